use crate::commands::CommandContext;
use crate::core::{error::Result, print_success};

pub async fn execute_update(ctx: &CommandContext) -> Result<()> {
    let status = ctx.manager.pull_latest(&ctx.environment).await?;

    print_success(&format!(
        "Branch '{}' is up to date (last updated {})",
        status.branch.as_deref().unwrap_or("unknown"),
        status.last_updated.as_deref().unwrap_or("unknown")
    ));
    println!();
    Ok(())
}
