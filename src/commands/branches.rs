use crate::commands::CommandContext;
use crate::core::{
    catalog::{Branch, BranchViewPolicy},
    error::Result,
    print_info, print_section_header,
};
use colored::*;

pub async fn execute_branches(
    ctx: &CommandContext,
    filter: Option<String>,
    show_all: bool,
    json: bool,
) -> Result<()> {
    let fetched = ctx.manager.fetch_branches().await?;
    let policy = ctx.manager.view_policy();

    // --all bypasses the hide list but keeps the ordering rules
    let visible = if show_all {
        let unhidden = BranchViewPolicy {
            hidden: Default::default(),
            ..policy.clone()
        };
        unhidden.apply(&fetched)
    } else {
        policy.apply(&fetched)
    };

    let listed = match filter {
        Some(query) => BranchViewPolicy::filter(&visible, &query),
        None => visible,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    if listed.is_empty() {
        print_info("No branches match.");
        return Ok(());
    }

    let status = ctx.manager.check_status(&ctx.environment).await?;
    let installed_branch = status.branch.as_deref();

    print_section_header("Remote Branches");
    for branch in &listed {
        print_branch_line(policy, branch, installed_branch == Some(branch.name.as_str()));
    }
    println!();

    Ok(())
}

fn print_branch_line(policy: &BranchViewPolicy, branch: &Branch, is_installed: bool) {
    let display = policy.display_name(&branch.name);
    if is_installed {
        // Installed branch format: [*] branch-name
        println!(
            "{}{}{} {}",
            "[".bright_black(),
            "*".white(),
            "]".bright_black(),
            display.blue()
        );
    } else {
        println!(
            "{}{}{} {}",
            "[".bright_black(),
            " ".white(),
            "]".bright_black(),
            display.blue()
        );
    }
}
