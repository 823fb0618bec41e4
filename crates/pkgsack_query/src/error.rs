//! Query-time errors (spec.md §7 "Caller input errors").

use thiserror::Error;

/// Errors raised while building or applying a [`crate::Query`] or
/// [`crate::Selector`].
#[derive(Debug, Error)]
pub enum QueryError {
    /// An unknown keyname, or a `(keyname, cmp-type)` combination the
    /// allowed-keys table (spec.md §4.4) does not permit.
    #[error("bad query: {0}")]
    BadQuery(String),

    /// A selector with no required field set, or an unsupported
    /// cmp/field combination (spec.md §4.6).
    #[error("bad selector: {0}")]
    BadSelector(String),

    /// An arch string the pool does not recognize as well-formed
    /// (spec.md §4.6 step 3).
    #[error("invalid architecture: {0}")]
    InvalidArchitecture(String),

    /// A contract violation: reading a result before applying the query,
    /// or similar programmer error (spec.md §7 "Contract violations").
    #[error("internal error: {0}")]
    InternalError(String),
}
