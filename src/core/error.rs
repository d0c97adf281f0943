//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`AddonNavigatorError`] which provides comprehensive error
//! handling for all addon-navigator operations. It uses `thiserror` for ergonomic
//! error definitions and includes specialized error constructors for common
//! failure scenarios.
//!
//! # Public API
//! - [`AddonNavigatorError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, AddonNavigatorError>`
//!
//! # Error Categories
//! - **Catalog**: Remote branch listing unreachable or unreadable
//! - **Backup**: Existing install could not be protected before a destructive step
//! - **Sync**: Clone or pull failed partway through
//! - **Settings**: Persisted settings could not be written
//! - **Concurrency**: A mutating operation was already in flight for the environment

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for addon-navigator
#[derive(Error, Debug)]
pub enum AddonNavigatorError {
    // Remote catalog errors
    #[error("Branch catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },

    // Backup errors
    #[error("Backup failed, aborting before any destructive step: {reason}")]
    BackupFailed { reason: String },

    #[error("No backup available at '{path}'")]
    NoBackupAvailable { path: PathBuf },

    // Clone/pull errors
    #[error("Sync failed while {context}: {reason}")]
    SyncFailed { context: String, reason: String },

    // Settings errors
    #[error("Failed to persist settings to '{path}': {source}")]
    PersistFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Concurrency errors
    #[error("Another operation is already in progress for environment '{environment}'")]
    OperationInProgress { environment: String },

    // Environment errors
    #[error("Invalid Blender version '{input}'. Use format like: 5.0 or 4.2")]
    InvalidVersion { input: String },

    #[error("Path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    // Passthrough errors
    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using AddonNavigatorError
pub type Result<T> = std::result::Result<T, AddonNavigatorError>;

impl AddonNavigatorError {
    /// Create a catalog unavailable error
    pub fn catalog_unavailable(reason: impl Into<String>) -> Self {
        Self::CatalogUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a backup failed error
    pub fn backup_failed(reason: impl Into<String>) -> Self {
        Self::BackupFailed {
            reason: reason.into(),
        }
    }

    /// Create a no backup available error
    pub fn no_backup_available(path: impl Into<PathBuf>) -> Self {
        Self::NoBackupAvailable { path: path.into() }
    }

    /// Create a sync failed error with operation context
    pub fn sync_failed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SyncFailed {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create a persist failed error
    pub fn persist_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PersistFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an operation in progress error
    pub fn operation_in_progress(environment: impl Into<String>) -> Self {
        Self::OperationInProgress {
            environment: environment.into(),
        }
    }

    /// Create an invalid version error
    pub fn invalid_version(input: impl Into<String>) -> Self {
        Self::InvalidVersion {
            input: input.into(),
        }
    }

    /// Create a path not found error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }
}
