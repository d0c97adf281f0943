use crate::commands::CommandContext;
use crate::core::{error::Result, print_success};

pub async fn execute_restore(ctx: &CommandContext) -> Result<()> {
    let status = ctx.manager.restore(&ctx.environment).await?;

    print_success(&format!(
        "Restored backup to {} (branch '{}')",
        ctx.environment.install_path.display(),
        status.branch.as_deref().unwrap_or("unknown")
    ));
    println!();
    Ok(())
}
