//! Core functionality for the addon-navigator tool.
//!
//! This module provides the fundamental building blocks for environment
//! resolution, branch cataloging, backup handling, installation state
//! management, settings persistence, and output formatting.

pub mod backup;
pub mod catalog;
pub mod environment;
pub mod error;
pub mod manager;
pub mod output;
pub mod repo;
pub mod settings;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{AddonNavigatorError, Result};

// === Environment resolution ===
// Per-Blender-version addon directory layout
pub use environment::{Environment, ADDON_DIR_NAME, BACKUP_DIR_NAME};

// === Branch catalog ===
// Branch snapshots and the hide/priority presentation policy
pub use catalog::{Branch, BranchViewPolicy};

// === Backup handling ===
// Single-slot backup and restore for the install directory
pub use backup::{backup_if_needed, restore, BackupOutcome};

// === Installation state ===
// Working-copy inspection and the git collaborator seam
pub use repo::{check_status, GitClient, InstallStatus, SystemGitClient};

// === Orchestration ===
// Single-flight install/switch/update state machine
pub use manager::{InstallManager, ManagerConfig, RetryPolicy, DEFAULT_BRANCH, REPO_URL};

// === Settings persistence ===
// User preferences stored as JSON under the per-OS config directory
pub use settings::{Settings, SettingsStore};

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_detail, print_error, print_info, print_section_header, print_success};
