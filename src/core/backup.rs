//! Backup and restore for the addon install directory.
//!
//! Before any destructive change to an install directory the existing install
//! is relocated into a single backup slot beside it (see
//! [`crate::core::environment::BACKUP_DIR_NAME`]). The newest backup overwrites
//! any previous one; there is exactly one slot per environment.
//!
//! Relocation is atomic with respect to the install directory: either the whole
//! install ends up in the slot and the install path is gone, or the install is
//! left exactly as it was. A plain rename is attempted first; when the rename
//! fails (e.g. the slot is on another filesystem) the tree is copied, verified
//! against the source by entry count and byte total, and only then is the
//! source deleted.

use crate::core::environment::Environment;
use crate::core::error::{AddonNavigatorError, Result};
use std::fs;
use std::path::Path;

/// What `backup_if_needed` did for this operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    /// The existing install was moved into the backup slot
    Relocated,
    /// Nothing to protect: the install path does not exist
    SkippedMissing,
    /// Backup disabled by policy for this operation
    SkippedDisabled,
}

/// Relocate the existing install into the backup slot, if there is one and
/// policy allows it. On any failure the install directory is left untouched
/// and the error is [`AddonNavigatorError::BackupFailed`].
pub fn backup_if_needed(env: &Environment, auto_backup: bool) -> Result<BackupOutcome> {
    if !env.install_path.exists() {
        log::debug!(
            "No install at {}, nothing to back up",
            env.install_path.display()
        );
        return Ok(BackupOutcome::SkippedMissing);
    }

    if !auto_backup {
        log::info!("Auto-backup disabled, skipping backup");
        return Ok(BackupOutcome::SkippedDisabled);
    }

    // Single slot: the newest backup replaces any stale one
    if env.backup_path.exists() {
        fs::remove_dir_all(&env.backup_path).map_err(|e| {
            AddonNavigatorError::backup_failed(format!(
                "could not clear stale backup '{}': {}",
                env.backup_path.display(),
                e
            ))
        })?;
    }

    relocate(&env.install_path, &env.backup_path).map_err(AddonNavigatorError::backup_failed)?;

    log::info!(
        "Backed up {} -> {}",
        env.install_path.display(),
        env.backup_path.display()
    );
    Ok(BackupOutcome::Relocated)
}

/// Restore the backup slot back onto the install path. Fails with
/// [`AddonNavigatorError::NoBackupAvailable`] when the slot does not exist.
pub fn restore(env: &Environment) -> Result<()> {
    if !env.backup_path.exists() {
        return Err(AddonNavigatorError::no_backup_available(&env.backup_path));
    }

    if env.install_path.exists() {
        fs::remove_dir_all(&env.install_path)?;
    }

    relocate(&env.backup_path, &env.install_path).map_err(AddonNavigatorError::backup_failed)?;

    log::info!(
        "Restored {} -> {}",
        env.backup_path.display(),
        env.install_path.display()
    );
    Ok(())
}

/// Move a directory tree: rename where possible, verified copy-then-delete
/// otherwise. On failure the source is left as it was and any partial
/// destination is removed.
fn relocate(src: &Path, dst: &Path) -> std::result::Result<(), String> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            log::debug!(
                "Rename {} -> {} failed ({}), falling back to copy",
                src.display(),
                dst.display(),
                rename_err
            );

            if let Err(e) = copy_dir_recursive(src, dst) {
                let _ = fs::remove_dir_all(dst);
                return Err(format!("copy to '{}' failed: {}", dst.display(), e));
            }

            // The source is only deleted once the copy provably matches it
            match (tree_summary(src), tree_summary(dst)) {
                (Ok(src_sum), Ok(dst_sum)) if src_sum == dst_sum => {}
                (Ok(src_sum), Ok(dst_sum)) => {
                    let _ = fs::remove_dir_all(dst);
                    return Err(format!(
                        "copy verification failed: source has {} files / {} bytes, copy has {} files / {} bytes",
                        src_sum.0, src_sum.1, dst_sum.0, dst_sum.1
                    ));
                }
                (Err(e), _) | (_, Err(e)) => {
                    let _ = fs::remove_dir_all(dst);
                    return Err(format!("copy verification failed: {}", e));
                }
            }

            if let Err(e) = fs::remove_dir_all(src) {
                let _ = fs::remove_dir_all(dst);
                return Err(format!(
                    "could not remove source '{}' after copy: {}",
                    src.display(),
                    e
                ));
            }

            Ok(())
        }
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let target = dst.join(entry.file_name());
        if file_type.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

/// (file count, total bytes) for a tree, used to verify copies
fn tree_summary(path: &Path) -> std::io::Result<(u64, u64)> {
    let mut files = 0u64;
    let mut bytes = 0u64;
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            let (f, b) = tree_summary(&entry.path())?;
            files += f;
            bytes += b;
        } else {
            files += 1;
            bytes += entry.metadata()?.len();
        }
    }
    Ok((files, bytes))
}
