use crate::commands::CommandContext;
use crate::core::{error::Result, print_detail, print_section_header, repo::InstallStatus};
use colored::*;

pub async fn execute_status(ctx: &CommandContext, json: bool) -> Result<()> {
    let status = ctx.manager.check_status(&ctx.environment).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    print_status(&ctx.settings.blender_version, &status);
    Ok(())
}

fn print_status(blender_version: &str, status: &InstallStatus) {
    print_section_header(&format!("Serpens install (Blender {})", blender_version));

    if !status.installed {
        println!("  {}", "Not installed".yellow());
        println!();
        return;
    }

    print_detail("Path", &status.path);
    print_detail(
        "Branch",
        status.branch.as_deref().unwrap_or("unknown (not a git checkout)"),
    );
    print_detail("Updated", status.last_updated.as_deref().unwrap_or("unknown"));
    println!();
}
