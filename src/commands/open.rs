use crate::commands::CommandContext;
use crate::core::{error::Result, print_info};

pub fn execute_open(ctx: &CommandContext) -> Result<()> {
    ctx.manager.open_install_folder(&ctx.environment)?;

    print_info(&format!(
        "Opening {}",
        ctx.environment.install_path.display()
    ));
    Ok(())
}
