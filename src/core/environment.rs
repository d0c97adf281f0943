//! Environment resolution for target Blender installations.
//!
//! An [`Environment`] identifies one (Blender version, addons directory) target
//! and carries the canonical install and backup paths derived from it. Resolution
//! is a pure function: no filesystem access, no network. Environments are derived
//! on demand from user settings and never persisted.
//!
//! # Path layout
//! - install: `<addons dir>/scripting_nodes`
//! - backup:  `<addons dir>/_tmp_scripting_nodes_backup`
//!
//! The backup path is always derived from the install path so the backup lives
//! beside the install it protects.

use crate::core::error::{AddonNavigatorError, Result};
use std::path::PathBuf;

/// Directory name of the managed addon inside the addons folder
pub const ADDON_DIR_NAME: &str = "scripting_nodes";

/// Single backup slot name, kept beside the install
pub const BACKUP_DIR_NAME: &str = "_tmp_scripting_nodes_backup";

/// One resolved installation target: a Blender version plus the directories
/// every operation works against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub blender_version: String,
    pub addons_dir: PathBuf,
    pub install_path: PathBuf,
    pub backup_path: PathBuf,
}

impl Environment {
    /// Resolve the environment for a Blender version and optional custom path.
    ///
    /// A non-empty `custom_path` replaces the default per-OS addons directory
    /// wholesale; the install and backup sub-paths stay fixed either way.
    /// Fails with [`AddonNavigatorError::InvalidVersion`] when the version
    /// selector does not look like a Blender version (`MAJOR.MINOR`).
    pub fn resolve(blender_version: &str, custom_path: &str) -> Result<Self> {
        if !is_valid_blender_version(blender_version) {
            return Err(AddonNavigatorError::invalid_version(blender_version));
        }

        let addons_dir = if custom_path.is_empty() {
            default_addons_dir(blender_version)
        } else {
            PathBuf::from(custom_path)
        };

        let install_path = addons_dir.join(ADDON_DIR_NAME);
        let backup_path = addons_dir.join(BACKUP_DIR_NAME);

        Ok(Environment {
            blender_version: blender_version.to_string(),
            addons_dir,
            install_path,
            backup_path,
        })
    }

    /// Canonical key identifying this environment, used for single-flight
    /// locking. Two environments with the same addons directory share a key.
    pub fn key(&self) -> String {
        self.addons_dir.to_string_lossy().to_string()
    }
}

/// Blender version selectors are `MAJOR.MINOR` with numeric components
fn is_valid_blender_version(version: &str) -> bool {
    let mut parts = version.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(major), Some(minor), None) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// Default Blender addons directory for a version, per OS
fn default_addons_dir(blender_version: &str) -> PathBuf {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::home_dir().unwrap_or_default().join(".config"))
            .join("blender"),
        "macos" => dirs::home_dir()
            .unwrap_or_default()
            .join("Library/Application Support/Blender"),
        "windows" => dirs::config_dir()
            .unwrap_or_default()
            .join("Blender Foundation")
            .join("Blender"),
        _ => dirs::config_dir().unwrap_or_default().join("blender"),
    };

    base.join(blender_version).join("scripts").join("addons")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_custom_path() -> Result<()> {
        let env = Environment::resolve("5.0", "/custom/addons")?;
        assert_eq!(env.addons_dir, PathBuf::from("/custom/addons"));
        assert_eq!(
            env.install_path,
            PathBuf::from("/custom/addons").join("scripting_nodes")
        );
        assert_eq!(
            env.backup_path,
            PathBuf::from("/custom/addons").join("_tmp_scripting_nodes_backup")
        );
        Ok(())
    }

    #[test]
    fn test_resolve_default_path_contains_version() -> Result<()> {
        let env = Environment::resolve("4.2", "")?;
        let rendered = env.addons_dir.to_string_lossy().to_string();
        assert!(rendered.contains("4.2"));
        assert!(rendered.ends_with(&format!("scripts{}addons", std::path::MAIN_SEPARATOR)));
        Ok(())
    }

    #[test]
    fn test_backup_lives_beside_install() -> Result<()> {
        let env = Environment::resolve("5.0", "/tmp/anywhere")?;
        assert_eq!(env.install_path.parent(), env.backup_path.parent());
        Ok(())
    }

    #[test]
    fn test_invalid_versions_rejected() {
        for input in ["", "abc", "5", "5.0.1", "5.x", "v5.0", "5..0", "5.", ".0"] {
            let result = Environment::resolve(input, "");
            assert!(result.is_err(), "expected '{}' to be rejected", input);
            match result.unwrap_err() {
                AddonNavigatorError::InvalidVersion { input: got } => assert_eq!(got, input),
                other => panic!("expected InvalidVersion, got: {}", other),
            }
        }
    }

    #[test]
    fn test_valid_versions_accepted() {
        for input in ["5.0", "4.2", "3.6", "10.12"] {
            assert!(Environment::resolve(input, "").is_ok());
        }
    }

    #[test]
    fn test_key_is_shared_per_addons_dir() -> Result<()> {
        let a = Environment::resolve("5.0", "/custom/addons")?;
        let b = Environment::resolve("4.2", "/custom/addons")?;
        assert_eq!(a.key(), b.key());
        Ok(())
    }
}
