//! Remote repository fixtures for integration tests
//!
//! Builds a local git repository that stands in for the addon's remote, with
//! the branch layout the manager expects: a default branch carrying the addon
//! tree plus extra feature branches.

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A local git repository acting as the remote. The TempDir must be kept
/// alive for the duration of the test to prevent cleanup.
pub struct RemoteRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl RemoteRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The repository path as a clone/ls-remote URL
    pub fn url(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

/// Sets up a local "remote" with a `blender_5` default branch containing the
/// addon tree and a `feature-x` branch with one extra file.
pub fn setup_remote_repo() -> Result<RemoteRepo> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().to_path_buf();

    git(&path, &["init", "-b", "blender_5"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    create_file(&path, "__init__.py", "bl_info = {\"name\": \"Serpens\"}\n")?;
    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial commit"])?;

    git(&path, &["checkout", "-b", "feature-x"])?;
    create_file(&path, "experimental.py", "# experimental\n")?;
    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Add experimental module"])?;

    // Leave the default branch checked out
    git(&path, &["checkout", "blender_5"])?;

    Ok(RemoteRepo { temp_dir, path })
}

/// Commits a new file on the given branch of the remote, for exercising pulls
pub fn push_update(remote: &RemoteRepo, branch: &str, filename: &str) -> Result<()> {
    git(&remote.path, &["checkout", branch])?;
    create_file(&remote.path, filename, "updated content\n")?;
    git(&remote.path, &["add", "."])?;
    git(&remote.path, &["commit", "-m", "Update"])?;
    Ok(())
}

/// Creates a file with the specified content in the repository
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content)?;
    Ok(())
}

/// Runs a git command in the repository, asserting success
pub fn git(repo_path: &Path, args: &[&str]) -> Result<()> {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()?;
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(())
}
