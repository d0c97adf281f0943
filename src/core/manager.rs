//! Installation state manager: the orchestration core.
//!
//! [`InstallManager`] sequences install/switch/update for one environment at a
//! time as idempotent state transitions: check the disk, protect existing data
//! through the backup slot, clone or pull via the [`GitClient`] collaborator,
//! verify, and re-derive a fresh [`InstallStatus`]. All operations are async;
//! blocking git and filesystem work runs under `spawn_blocking` so callers'
//! event loops never stall.
//!
//! # Single-flight guarantee
//! At most one mutating operation runs per environment at any time. A second
//! mutating request for the same environment fails fast with
//! [`AddonNavigatorError::OperationInProgress`] instead of interleaving.
//! Read-only status checks never take the flight slot; operations on distinct
//! environments are fully independent.
//!
//! # Failure policy
//! Backup failure aborts before any destructive step. Sync failure leaves the
//! backup in place and the install directory in whatever partial state git left
//! it; nothing is auto-restored, a later status check still reports accurately.

use crate::core::backup::{self, BackupOutcome};
use crate::core::catalog::{Branch, BranchViewPolicy};
use crate::core::environment::Environment;
use crate::core::error::{AddonNavigatorError, Result};
use crate::core::repo::{self, GitClient, InstallStatus};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Remote repository the addon is synced from, fixed for this release
pub const REPO_URL: &str = "https://github.com/CoreyCorza/scripting_nodes.git";

/// Branch installed when none was chosen explicitly
pub const DEFAULT_BRANCH: &str = "blender_5";

/// Bounded retry for the branch catalog fetch. The default of one attempt
/// means no automatic retry; retries are an explicit configuration choice,
/// never a hidden sleep loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::from_secs(2),
        }
    }
}

/// Static configuration for the manager
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    pub repo_url: String,
    pub default_branch: String,
    pub view_policy: BranchViewPolicy,
    pub retry: RetryPolicy,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            repo_url: REPO_URL.to_string(),
            default_branch: DEFAULT_BRANCH.to_string(),
            view_policy: BranchViewPolicy::serpens_default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Tracks which environments currently have a mutating operation in flight
#[derive(Debug, Default)]
struct FlightTable {
    active: Mutex<HashSet<String>>,
}

impl FlightTable {
    fn acquire(self: &Arc<Self>, key: &str) -> Result<FlightGuard> {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if !active.insert(key.to_string()) {
            return Err(AddonNavigatorError::operation_in_progress(key));
        }
        Ok(FlightGuard {
            table: Arc::clone(self),
            key: key.to_string(),
        })
    }
}

/// Releases the flight slot on drop, so a failed operation never wedges its
/// environment
struct FlightGuard {
    table: Arc<FlightTable>,
    key: String,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        let mut active = self.table.active.lock().unwrap_or_else(|e| e.into_inner());
        active.remove(&self.key);
    }
}

/// Orchestrates install/switch/update per environment
pub struct InstallManager<C: GitClient + 'static> {
    config: ManagerConfig,
    client: Arc<C>,
    flights: Arc<FlightTable>,
}

impl<C: GitClient + 'static> InstallManager<C> {
    pub fn new(config: ManagerConfig, client: C) -> Self {
        Self {
            config,
            client: Arc::new(client),
            flights: Arc::new(FlightTable::default()),
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn view_policy(&self) -> &BranchViewPolicy {
        &self.config.view_policy
    }

    /// Read-only status check. Safe to call anytime, including concurrently
    /// with a mutating operation (the answer is then only advisory).
    pub async fn check_status(&self, env: &Environment) -> Result<InstallStatus> {
        let env = env.clone();
        run_blocking(move || repo::check_status(&env)).await
    }

    /// Fetch the raw branch snapshot from the remote, honoring the bounded
    /// retry policy. Presentation filtering is the caller's concern via
    /// [`BranchViewPolicy`].
    pub async fn fetch_branches(&self) -> Result<Vec<Branch>> {
        let attempts = self.config.retry.max_attempts.max(1);
        let mut last_err = None;

        for attempt in 1..=attempts {
            let client = Arc::clone(&self.client);
            let url = self.config.repo_url.clone();
            match run_blocking(move || client.list_remote_branches(&url)).await {
                Ok(branches) => return Ok(branches),
                Err(e @ AddonNavigatorError::CatalogUnavailable { .. }) => {
                    log::warn!("Branch fetch attempt {}/{} failed: {}", attempt, attempts, e);
                    last_err = Some(e);
                    if attempt < attempts {
                        tokio::time::sleep(self.config.retry.backoff * attempt).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            AddonNavigatorError::catalog_unavailable("branch fetch failed with no attempts made")
        }))
    }

    /// Switch the environment to `branch`.
    ///
    /// Switching to the branch that is already installed means "update": the
    /// working copy is pulled instead of re-cloned. Otherwise the existing
    /// install is backed up (policy permitting) and the branch is shallow
    /// cloned fresh. Returns the re-derived status on success.
    pub async fn switch_branch(
        &self,
        env: &Environment,
        branch: &str,
        auto_backup: bool,
    ) -> Result<InstallStatus> {
        let _guard = self.flights.acquire(&env.key())?;

        let current = {
            let env = env.clone();
            run_blocking(move || repo::check_status(&env)).await?
        };

        if current.installed && current.branch.as_deref() == Some(branch) {
            log::info!("Branch '{}' already installed, pulling latest", branch);
            self.pull_in_place(env).await?;
        } else {
            log::info!(
                "Switching {} to branch '{}'",
                env.install_path.display(),
                branch
            );
            self.replace_install(env, branch, auto_backup).await?;
        }

        let env = env.clone();
        run_blocking(move || repo::check_status(&env)).await
    }

    /// Install the default branch; used when nothing is installed yet
    pub async fn install(&self, env: &Environment, auto_backup: bool) -> Result<InstallStatus> {
        let default_branch = self.config.default_branch.clone();
        self.switch_branch(env, &default_branch, auto_backup).await
    }

    /// Pull the currently installed branch up to date
    pub async fn pull_latest(&self, env: &Environment) -> Result<InstallStatus> {
        let _guard = self.flights.acquire(&env.key())?;

        self.pull_in_place(env).await?;

        let env = env.clone();
        run_blocking(move || repo::check_status(&env)).await
    }

    /// Restore the backup slot onto the install path. Mutates the install
    /// directory, so it takes the flight slot like any other mutation.
    pub async fn restore(&self, env: &Environment) -> Result<InstallStatus> {
        let _guard = self.flights.acquire(&env.key())?;

        {
            let env = env.clone();
            run_blocking(move || backup::restore(&env)).await?;
        }

        let env = env.clone();
        run_blocking(move || repo::check_status(&env)).await
    }

    /// Ask the OS shell to open the install folder. A side-effecting action
    /// outside the state machine; never takes the flight slot.
    pub fn open_install_folder(&self, env: &Environment) -> Result<()> {
        if !env.install_path.exists() {
            return Err(AddonNavigatorError::path_not_found(&env.install_path));
        }

        let opener = match std::env::consts::OS {
            "windows" => "explorer",
            "macos" => "open",
            _ => "xdg-open",
        };

        std::process::Command::new(opener)
            .arg(&env.install_path)
            .spawn()?;
        Ok(())
    }

    /// Pull with the flight slot already held by the caller
    async fn pull_in_place(&self, env: &Environment) -> Result<()> {
        if !env.install_path.exists() {
            return Err(AddonNavigatorError::path_not_found(&env.install_path));
        }
        if !env.install_path.join(".git").exists() {
            return Err(AddonNavigatorError::sync_failed(
                "pulling latest changes",
                "install is not a git working copy, switch to a branch first",
            ));
        }

        let client = Arc::clone(&self.client);
        let workdir = env.install_path.clone();
        run_blocking(move || client.pull(&workdir)).await
    }

    /// Backup (or clear, when backup is disabled) the existing install, then
    /// clone `branch` fresh and verify the result. Flight slot held by caller.
    async fn replace_install(
        &self,
        env: &Environment,
        branch: &str,
        auto_backup: bool,
    ) -> Result<()> {
        let outcome = {
            let env = env.clone();
            run_blocking(move || backup::backup_if_needed(&env, auto_backup)).await?
        };

        let client = Arc::clone(&self.client);
        let env = env.clone();
        let branch = branch.to_string();
        let url = self.config.repo_url.clone();
        run_blocking(move || {
            // With backup disabled the old install is removed right before the
            // clone; with backup enabled the relocation already cleared it
            if outcome == BackupOutcome::SkippedDisabled && env.install_path.exists() {
                std::fs::remove_dir_all(&env.install_path)?;
            }
            std::fs::create_dir_all(&env.addons_dir)?;

            client.clone_branch(&url, &branch, &env.install_path)?;
            verify_working_copy(&env.install_path, &branch)
        })
        .await
    }
}

/// A clone that "succeeded" but produced an unusable tree is still a sync
/// failure: the branch may simply not contain the addon.
fn verify_working_copy(install_path: &Path, branch: &str) -> Result<()> {
    let populated = install_path
        .read_dir()
        .map(|mut entries| entries.any(|e| e.is_ok()))
        .unwrap_or(false);

    if !install_path.join(".git").exists() || !populated {
        return Err(AddonNavigatorError::sync_failed(
            format!("cloning branch '{}'", branch),
            format!(
                "clone completed but no working copy found at '{}'",
                install_path.display()
            ),
        ));
    }
    Ok(())
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) => Err(AddonNavigatorError::Io(std::io::Error::other(e))),
    }
}
