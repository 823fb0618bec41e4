//! Repo model (spec.md §3 "Repo", C2).

use crate::ids::RepoId;

/// A repo: a named collection of solvables, at most one of which is ever
/// marked `installed` within a given pool (spec.md §3 invariant).
#[derive(Debug, Clone)]
pub struct Repo {
    id: RepoId,
    name: String,
    installed: bool,
    cost: i32,
    gpgcheck: bool,
}

impl Repo {
    pub(crate) fn new(id: RepoId, name: impl Into<String>, installed: bool) -> Self {
        Self {
            id,
            name: name.into(),
            installed,
            cost: 1000,
            gpgcheck: true,
        }
    }

    /// This repo's id.
    pub fn id(&self) -> RepoId {
        self.id
    }

    /// The repo name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the `@System` installed-package repo.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Repo priority cost: lower costs are preferred by the solver when
    /// otherwise-equal candidates come from different repos (spec.md §4.7).
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Sets the repo cost.
    pub fn set_cost(&mut self, cost: i32) {
        self.cost = cost;
    }

    /// Whether packages from this repo must carry a valid GPG signature.
    pub fn gpgcheck(&self) -> bool {
        self.gpgcheck
    }

    /// Sets the gpgcheck flag.
    pub fn set_gpgcheck(&mut self, gpgcheck: bool) {
        self.gpgcheck = gpgcheck;
    }
}
