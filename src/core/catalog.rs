//! Branch catalog normalization and presentation policy.
//!
//! Fetching the raw branch list is a collaborator concern (see
//! [`crate::core::repo::GitClient`]); this module owns everything that happens
//! to a fetched snapshot afterwards. All functions here are pure and
//! deterministic over an in-memory snapshot, with no network access.
//!
//! # Public API
//! - [`Branch`]: One named line of development in the remote repository
//! - [`BranchViewPolicy`]: Static hide/priority/display-override configuration
//!
//! # Ordering
//! Hidden branches are dropped, priority branches sort first in priority-list
//! order, and the rest follow in case-insensitive lexicographic order. The
//! result is independent of fetch order and idempotent.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A named branch in the remote repository. Each fetch produces a fresh
/// snapshot; snapshots are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
}

impl Branch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Static presentation policy applied to branch snapshots. Never mutates the
/// underlying set, only filters and orders a copy of it.
#[derive(Debug, Clone, Default)]
pub struct BranchViewPolicy {
    pub hidden: HashSet<String>,
    pub priority: Vec<String>,
    pub display_overrides: HashMap<String, String>,
}

impl BranchViewPolicy {
    /// Policy shipped for the Serpens repository: retired branches hidden,
    /// the active development branches pinned to the top.
    pub fn serpens_default() -> Self {
        Self {
            hidden: ["main", "v4"].iter().map(|s| s.to_string()).collect(),
            priority: vec!["blender_5".to_string(), "personal-dev".to_string()],
            display_overrides: HashMap::new(),
        }
    }

    /// Apply hide + ordering rules to a fetched snapshot.
    ///
    /// Priority branches keep their priority-list index as the tie-break, so
    /// ordering is stable regardless of the order the remote returned them in.
    pub fn apply(&self, branches: &[Branch]) -> Vec<Branch> {
        let mut visible: Vec<&Branch> = branches
            .iter()
            .filter(|b| !self.hidden.contains(&b.name))
            .collect();

        visible.sort_by(|a, b| {
            let a_rank = self.priority_rank(&a.name);
            let b_rank = self.priority_rank(&b.name);
            a_rank
                .cmp(&b_rank)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        visible.into_iter().cloned().collect()
    }

    /// Case-insensitive substring filter, preserving the input order
    pub fn filter(branches: &[Branch], query: &str) -> Vec<Branch> {
        if query.is_empty() {
            return branches.to_vec();
        }

        let query = query.to_lowercase();
        branches
            .iter()
            .filter(|b| b.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// Display name for a branch: exact-match override or the raw name
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.display_overrides
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }

    /// Priority-list index for a name; non-priority branches sort after all
    /// priority branches.
    fn priority_rank(&self, name: &str) -> usize {
        self.priority
            .iter()
            .position(|p| p == name)
            .unwrap_or(usize::MAX)
    }
}
