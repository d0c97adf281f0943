//! Addon Navigator - a CLI tool for managing Serpens addon installations
//! across Blender versions via git branches.
//!
//! This library provides the core functionality for addon-navigator, including
//! environment resolution, remote branch cataloging, single-slot backups,
//! single-flight installation state management, and settings persistence.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which
//! provides:
//! - Environment resolution per Blender version and custom path
//! - Branch catalog fetching and presentation policy
//! - Backup and restore of the install directory
//! - The install/switch/update orchestration core
//! - Settings persistence and error handling

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Error handling
    AddonNavigatorError,
    Result,

    // Environment resolution
    Environment,

    // Branch catalog
    Branch,
    BranchViewPolicy,

    // Backup handling
    BackupOutcome,

    // Installation state
    GitClient,
    InstallStatus,
    SystemGitClient,

    // Orchestration
    InstallManager,
    ManagerConfig,
    RetryPolicy,

    // Settings persistence
    Settings,
    SettingsStore,
};
