use addon_navigator::commands::*;
use addon_navigator::core::{error::Result, print_error};
use clap::{Parser, Subcommand};
use std::env;

#[derive(Parser)]
#[command(name = "addon-navigator")]
#[command(about = "Manage Serpens addon installations across Blender versions")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Target Blender version (overrides the saved setting, e.g. "5.0")
    #[arg(long, global = true, value_name = "VERSION")]
    blender_version: Option<String>,

    /// Addons directory to use instead of the per-OS default
    #[arg(long, global = true, value_name = "PATH")]
    custom_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the installation state for the active Blender version
    Status {
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the branches available on the remote
    Branches {
        /// Only show branches containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
        /// Include branches hidden by default
        #[arg(long)]
        all: bool,
        /// Print the branch list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Install the default branch
    Install,
    /// Switch the install to another branch
    Switch {
        /// Branch name to switch to
        branch: String,
    },
    /// Pull the latest changes for the installed branch
    Update,
    /// Restore the previous install from the backup slot
    Restore,
    /// Open the install folder in the system file browser
    Open,
    /// Show or change persisted settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the current settings
    Show,
    /// Change one or more settings
    Set {
        /// Blender version to target (e.g. "5.0")
        #[arg(long, value_name = "VERSION")]
        blender_version: Option<String>,
        /// Addons directory to use instead of the per-OS default; empty resets
        #[arg(long, value_name = "PATH")]
        custom_path: Option<String>,
        /// Back up the existing install before switching branches
        #[arg(long, value_name = "BOOL")]
        auto_backup: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let result = run(cli).await;
    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        // Settings commands operate on the store directly, without an environment
        Commands::Settings { action } => match action {
            None | Some(SettingsAction::Show) => execute_settings_show(),
            Some(SettingsAction::Set {
                blender_version,
                custom_path,
                auto_backup,
            }) => execute_settings_set(blender_version, custom_path, auto_backup),
        },
        Commands::Status { json } => {
            let ctx = CommandContext::resolve(cli.blender_version, cli.custom_path)?;
            execute_status(&ctx, json).await
        }
        Commands::Branches { filter, all, json } => {
            let ctx = CommandContext::resolve(cli.blender_version, cli.custom_path)?;
            execute_branches(&ctx, filter, all, json).await
        }
        Commands::Install => {
            let ctx = CommandContext::resolve(cli.blender_version, cli.custom_path)?;
            execute_install(&ctx).await
        }
        Commands::Switch { branch } => {
            let ctx = CommandContext::resolve(cli.blender_version, cli.custom_path)?;
            execute_switch(&ctx, branch).await
        }
        Commands::Update => {
            let ctx = CommandContext::resolve(cli.blender_version, cli.custom_path)?;
            execute_update(&ctx).await
        }
        Commands::Restore => {
            let ctx = CommandContext::resolve(cli.blender_version, cli.custom_path)?;
            execute_restore(&ctx).await
        }
        Commands::Open => {
            let ctx = CommandContext::resolve(cli.blender_version, cli.custom_path)?;
            execute_open(&ctx)
        }
    }
}
