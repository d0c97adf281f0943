//! Working-copy inspection and the version-control collaborator.
//!
//! Reads go through `git2`: HEAD branch and last-commit time are extracted from
//! the working copy without spawning a process. Mutating operations and the
//! remote listing shell out to the `git` binary through [`GitClient`], which
//! either succeed or fail atomically from this crate's point of view.
//!
//! # Public API
//! - [`GitClient`]: Trait seam for clone/pull/ls-remote, so orchestration can
//!   be tested without a network
//! - [`SystemGitClient`]: Production implementation backed by the `git` binary
//! - [`InstallStatus`]: On-disk truth for one environment at a point in time
//! - [`check_status`]: Read-only status derivation, safe against partial trees

use crate::core::catalog::Branch;
use crate::core::environment::Environment;
use crate::core::error::{AddonNavigatorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;

/// On-disk installation state for one environment. Produced by
/// [`check_status`]; never cached across operations that could invalidate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallStatus {
    pub installed: bool,
    pub path: String,
    pub branch: Option<String>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<String>,
}

/// Version-control collaborator: branch listing plus clone/pull on a working
/// copy. Implementations report failures as typed errors and never leave the
/// caller guessing about partial state beyond what the underlying tool does.
pub trait GitClient: Send + Sync {
    /// List the heads of the remote repository. Transport failure is
    /// [`AddonNavigatorError::CatalogUnavailable`]; an empty-but-successful
    /// listing is `Ok` with an empty vec.
    fn list_remote_branches(&self, repo_url: &str) -> Result<Vec<Branch>>;

    /// Shallow single-branch clone of `branch` into `dest`
    fn clone_branch(&self, repo_url: &str, branch: &str, dest: &Path) -> Result<()>;

    /// Pull the working copy at `workdir` up to the latest remote state
    fn pull(&self, workdir: &Path) -> Result<()>;
}

/// [`GitClient`] backed by the system `git` binary
#[derive(Debug, Clone, Default)]
pub struct SystemGitClient;

impl SystemGitClient {
    fn run_git(args: &[&str], workdir: Option<&Path>) -> std::io::Result<std::process::Output> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = workdir {
            cmd.current_dir(dir);
        }
        cmd.output()
    }
}

impl GitClient for SystemGitClient {
    fn list_remote_branches(&self, repo_url: &str) -> Result<Vec<Branch>> {
        let output = Self::run_git(&["ls-remote", "--heads", repo_url], None)
            .map_err(|e| AddonNavigatorError::catalog_unavailable(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AddonNavigatorError::catalog_unavailable(
                stderr.trim().to_string(),
            ));
        }

        // Each line is "<sha>\trefs/heads/<name>"
        let stdout = String::from_utf8_lossy(&output.stdout);
        let branches = stdout
            .lines()
            .filter_map(|line| {
                let (_, reference) = line.split_once('\t')?;
                let name = reference.strip_prefix("refs/heads/")?;
                Some(Branch::new(name))
            })
            .collect();

        Ok(branches)
    }

    fn clone_branch(&self, repo_url: &str, branch: &str, dest: &Path) -> Result<()> {
        // Only the latest tree is needed, history never is
        let dest_str = dest.to_string_lossy();
        let output = Self::run_git(
            &[
                "clone",
                "--branch",
                branch,
                "--single-branch",
                "--depth",
                "1",
                repo_url,
                &dest_str,
            ],
            None,
        )
        .map_err(|e| {
            AddonNavigatorError::sync_failed(
                format!("cloning branch '{}'", branch),
                format!("failed to run git: {}", e),
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AddonNavigatorError::sync_failed(
                format!("cloning branch '{}'", branch),
                stderr.trim().to_string(),
            ));
        }

        Ok(())
    }

    fn pull(&self, workdir: &Path) -> Result<()> {
        let output = Self::run_git(&["pull"], Some(workdir)).map_err(|e| {
            AddonNavigatorError::sync_failed(
                "pulling latest changes",
                format!("failed to run git: {}", e),
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AddonNavigatorError::sync_failed(
                "pulling latest changes",
                stderr.trim().to_string(),
            ));
        }

        Ok(())
    }
}

/// Derive the installation status for an environment by inspecting the disk.
///
/// Never mutates state and never fails on a broken install: a directory that
/// is not a usable git working copy still reports `installed: true` with the
/// branch unknown and the directory mtime as its last update.
pub fn check_status(env: &Environment) -> Result<InstallStatus> {
    let mut status = InstallStatus {
        installed: false,
        path: env.addons_dir.to_string_lossy().to_string(),
        branch: None,
        last_updated: None,
    };

    if !env.install_path.exists() {
        return Ok(status);
    }
    status.installed = true;

    match git2::Repository::open(&env.install_path) {
        Ok(repo) => {
            status.branch = current_branch(&repo);
            status.last_updated = last_commit_time(&repo);
        }
        Err(e) => {
            // Partial clone or plain directory: report what the disk knows
            log::debug!(
                "Install at {} is not a readable git repo: {}",
                env.install_path.display(),
                e
            );
        }
    }

    if status.last_updated.is_none() {
        status.last_updated = directory_mtime(&env.install_path);
    }

    Ok(status)
}

/// HEAD branch name, covering the unborn-HEAD case of a fresh clone with no
/// readable commit
fn current_branch(repo: &git2::Repository) -> Option<String> {
    match repo.head() {
        Ok(head) if head.is_branch() => head.shorthand().map(|s| s.to_string()),
        Ok(_) => None, // detached HEAD
        Err(_) => repo
            .find_reference("HEAD")
            .ok()?
            .symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .map(|s| s.to_string()),
    }
}

fn last_commit_time(repo: &git2::Repository) -> Option<String> {
    let head = repo.head().ok()?;
    let oid = head.target()?;
    let commit = repo.find_commit(oid).ok()?;
    let timestamp = DateTime::<Utc>::from_timestamp(commit.time().seconds(), 0)?;
    Some(timestamp.format("%Y-%m-%d %H:%M").to_string())
}

fn directory_mtime(path: &Path) -> Option<String> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let timestamp: DateTime<Utc> = modified.into();
    Some(timestamp.format("%Y-%m-%d %H:%M").to_string())
}
