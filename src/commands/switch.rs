use crate::commands::CommandContext;
use crate::core::{error::Result, print_success};

pub async fn execute_switch(ctx: &CommandContext, branch: String) -> Result<()> {
    let status = ctx
        .manager
        .switch_branch(&ctx.environment, &branch, ctx.settings.auto_backup)
        .await?;

    print_success(&format!(
        "Switched to branch '{}' (last updated {})",
        status.branch.as_deref().unwrap_or(&branch),
        status.last_updated.as_deref().unwrap_or("unknown")
    ));
    println!();
    Ok(())
}
