//! Stable error kinds a [`crate::Goal`] surfaces (spec.md §6, §7).

/// Errors a goal run or a job-queue mutation can produce.
#[derive(Debug, thiserror::Error)]
pub enum GoalError {
    /// The solver could not find a solution; carries one rendered message
    /// per problem (spec.md §4.9).
    #[error("no solution: {}", .0.join("; "))]
    NoSolution(Vec<String>),
    /// The transaction would erase or obsolete a protected package
    /// (spec.md §4.7 step 7, §4.9).
    #[error("the operation would result in removing the following protected packages: {}", .0.join(", "))]
    RemovalOfProtectedPkg(Vec<String>),
    /// A selector resolved to zero packages where the job requires at
    /// least one (e.g. erasing a name that is not installed).
    #[error("package not found: {0}")]
    PackageNotFound(String),
    /// A contract violation, e.g. reading results before `run()`.
    #[error("internal error: {0}")]
    InternalError(String),
    /// A selector attached to a job failed to compile.
    #[error(transparent)]
    Query(#[from] pkgsack_query::QueryError),
}
