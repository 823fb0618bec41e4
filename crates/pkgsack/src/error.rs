//! Errors a [`crate::Sack`] can raise, wrapping the lower layers' stable
//! error kinds (spec.md §6, §7).

use thiserror::Error;

/// Errors raised while building or operating on a [`crate::Sack`].
#[derive(Debug, Error)]
pub enum SackError {
    /// A strict-mode reldep or EVR string in repo metadata failed to
    /// parse. Unlike the query engine's lenient equality-mode matching
    /// (spec.md §4.4), repo loading treats this as `FILE_INVALID`: bad
    /// input data, not a user typo.
    #[error("invalid repo metadata: {0}")]
    FileInvalid(String),

    /// A package-id string did not match the `name;evr;arch;reponame`
    /// grammar (spec.md §6).
    #[error("invalid package-id string: {0:?}")]
    BadPackageId(String),

    /// A `SackConfig` TOML document failed to parse.
    #[error("bad sack config: {0}")]
    BadConfig(String),

    /// A pool-level invariant was violated (e.g. a second installed repo).
    #[error(transparent)]
    Pool(#[from] pkgsack_pool::PoolError),

    /// A query or selector failed to compile.
    #[error(transparent)]
    Query(#[from] pkgsack_query::QueryError),

    /// A goal run failed.
    #[error(transparent)]
    Goal(#[from] pkgsack_solve::GoalError),
}
