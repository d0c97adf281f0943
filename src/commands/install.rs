use crate::commands::CommandContext;
use crate::core::{error::Result, print_info, print_success};

pub async fn execute_install(ctx: &CommandContext) -> Result<()> {
    let existing = ctx.manager.check_status(&ctx.environment).await?;
    if existing.installed {
        if let Some(branch) = existing.branch.as_deref() {
            print_info(&format!(
                "Already installed on branch '{}'. Use 'update' to pull the latest changes or 'switch' to change branch.",
                branch
            ));
            return Ok(());
        }
    }

    let status = ctx
        .manager
        .install(&ctx.environment, ctx.settings.auto_backup)
        .await?;

    print_success(&format!(
        "Installed branch '{}' at {}",
        status.branch.as_deref().unwrap_or("unknown"),
        ctx.environment.install_path.display()
    ));
    println!();
    Ok(())
}
