//! Errors raised by the pool and repo model (spec.md §7).

use thiserror::Error;

/// Errors produced while building or querying a [`crate::Pool`].
#[derive(Debug, Error)]
pub enum PoolError {
    /// A second repo was marked `installed` in a pool that already has one
    /// (spec.md §3 invariant: "at most one repo within a sack may be marked
    /// installed").
    #[error("repo '{0}' cannot be marked installed: repo '{1}' is already the installed repo")]
    MultipleInstalledRepos(String, String),

    /// A solvable id did not originate from this pool, or has been retired.
    #[error("solvable id {0:?} is not valid in this pool")]
    UnknownSolvable(crate::SolvableId),

    /// A repo id did not originate from this pool.
    #[error("repo id {0:?} is not valid in this pool")]
    UnknownRepo(crate::RepoId),
}
