pub mod branches;
pub mod install;
pub mod open;
pub mod restore;
pub mod settings;
pub mod status;
pub mod switch;
pub mod update;

pub use branches::*;
pub use install::*;
pub use open::*;
pub use restore::*;
pub use settings::*;
pub use status::*;
pub use switch::*;
pub use update::*;

use crate::core::{
    environment::Environment,
    error::Result,
    manager::{InstallManager, ManagerConfig},
    repo::SystemGitClient,
    settings::{Settings, SettingsStore},
};

/// Everything a command needs: the persisted settings with any command-line
/// overrides applied, the environment they resolve to, and a manager wired to
/// the system git client.
pub struct CommandContext {
    pub settings: Settings,
    pub environment: Environment,
    pub manager: InstallManager<SystemGitClient>,
}

impl CommandContext {
    /// Load settings from the default store, apply overrides, and resolve the
    /// target environment. Overrides are for this invocation only and are
    /// never written back.
    pub fn resolve(
        blender_version: Option<String>,
        custom_path: Option<String>,
    ) -> Result<Self> {
        let store = SettingsStore::default_location();
        let mut settings = store.load()?;

        if let Some(version) = blender_version {
            settings.blender_version = version;
        }
        if let Some(path) = custom_path {
            settings.custom_path = path;
        }

        let environment = Environment::resolve(&settings.blender_version, &settings.custom_path)?;
        log::debug!(
            "Resolved environment for Blender {}: {}",
            settings.blender_version,
            environment.install_path.display()
        );

        let manager = InstallManager::new(ManagerConfig::default(), SystemGitClient);

        Ok(Self {
            settings,
            environment,
            manager,
        })
    }
}
