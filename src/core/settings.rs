//! User settings persistence.
//!
//! Settings are a small key-value JSON document owned exclusively by
//! [`SettingsStore`]: read at startup and before any operation that needs the
//! active environment, written only through an explicit [`SettingsStore::save`].
//! Unknown fields are ignored on read for forward compatibility and missing
//! fields fall back to defaults.
//!
//! Saving writes to a sibling temp file and renames it into place so a failed
//! write never corrupts a previously valid settings file.

use crate::core::error::{AddonNavigatorError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SETTINGS_FILE: &str = "settings.json";

/// Persisted user preferences
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(rename = "blenderVersion", default = "default_blender_version")]
    pub blender_version: String,

    #[serde(rename = "customPath", default)]
    pub custom_path: String,

    #[serde(rename = "autoBackup", default = "default_auto_backup")]
    pub auto_backup: bool,
}

fn default_blender_version() -> String {
    "5.0".to_string()
}

fn default_auto_backup() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blender_version: default_blender_version(),
            custom_path: String::new(),
            auto_backup: default_auto_backup(),
        }
    }
}

/// Loads and saves [`Settings`] under a root directory
#[derive(Debug, Clone)]
pub struct SettingsStore {
    root: PathBuf,
}

impl SettingsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the per-OS config directory
    pub fn default_location() -> Self {
        Self::new(config_directory())
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    /// Load settings, returning defaults when nothing has been persisted yet
    pub fn load(&self) -> Result<Settings> {
        let path = self.settings_path();
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings atomically: write a temp sibling, then rename into place
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let path = self.settings_path();
        std::fs::create_dir_all(&self.root)
            .map_err(|e| AddonNavigatorError::persist_failed(&path, e))?;

        let content = serde_json::to_string_pretty(settings)?;
        let tmp_path = self.root.join(format!("{}.tmp", SETTINGS_FILE));

        std::fs::write(&tmp_path, content)
            .map_err(|e| AddonNavigatorError::persist_failed(&path, e))?;
        std::fs::rename(&tmp_path, &path)
            .map_err(|e| AddonNavigatorError::persist_failed(&path, e))?;

        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }
}

/// Per-OS config directory for addon-navigator itself
fn config_directory() -> PathBuf {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::home_dir().unwrap_or_default().join(".config")),
        "macos" => dirs::home_dir()
            .unwrap_or_default()
            .join("Library/Application Support"),
        "windows" => dirs::config_dir().unwrap_or_default(),
        _ => dirs::config_dir().unwrap_or_default(),
    };

    base.join("addon-navigator")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_file_returns_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = SettingsStore::new(temp_dir.path());

        let settings = store.load()?;
        assert_eq!(settings.blender_version, "5.0");
        assert_eq!(settings.custom_path, "");
        assert!(settings.auto_backup);
        Ok(())
    }

    #[test]
    fn test_save_then_load_round_trip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = SettingsStore::new(temp_dir.path());

        let settings = Settings {
            blender_version: "4.2".to_string(),
            custom_path: "/my/addons".to_string(),
            auto_backup: false,
        };
        store.save(&settings)?;

        let loaded = store.load()?;
        assert_eq!(loaded, settings);
        Ok(())
    }

    #[test]
    fn test_save_uses_wire_field_names() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = SettingsStore::new(temp_dir.path());
        store.save(&Settings::default())?;

        let content = std::fs::read_to_string(temp_dir.path().join("settings.json"))?;
        assert!(content.contains("blenderVersion"));
        assert!(content.contains("customPath"));
        assert!(content.contains("autoBackup"));
        Ok(())
    }

    #[test]
    fn test_unknown_fields_ignored() -> Result<()> {
        let temp_dir = TempDir::new()?;
        std::fs::write(
            temp_dir.path().join("settings.json"),
            r#"{"blenderVersion": "4.2", "customPath": "", "autoBackup": true, "futureField": 42}"#,
        )?;

        let store = SettingsStore::new(temp_dir.path());
        let settings = store.load()?;
        assert_eq!(settings.blender_version, "4.2");
        Ok(())
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        std::fs::write(
            temp_dir.path().join("settings.json"),
            r#"{"blenderVersion": "3.6"}"#,
        )?;

        let store = SettingsStore::new(temp_dir.path());
        let settings = store.load()?;
        assert_eq!(settings.blender_version, "3.6");
        assert_eq!(settings.custom_path, "");
        assert!(settings.auto_backup);
        Ok(())
    }

    #[test]
    fn test_save_replaces_previous_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = SettingsStore::new(temp_dir.path());

        store.save(&Settings::default())?;
        let updated = Settings {
            blender_version: "4.2".to_string(),
            ..Settings::default()
        };
        store.save(&updated)?;

        assert_eq!(store.load()?.blender_version, "4.2");
        // No leftover temp file after a successful save
        assert!(!temp_dir.path().join("settings.json.tmp").exists());
        Ok(())
    }
}
