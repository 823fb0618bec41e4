//! Errors produced by the data-model layer.

use thiserror::Error;

/// Errors produced by the data-model layer.
///
/// These are the stable error kinds referenced by `spec.md` §6/§7. Higher
/// layers (`pkgsack_query`, `pkgsack_solve`) define their own error enums
/// and wrap these with `#[from]` rather than re-declaring the variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypesError {
    /// An EVR string could not be parsed.
    #[error("invalid EVR string: {0:?}")]
    InvalidEvr(String),

    /// A reldep string did not parse under strict rules.
    ///
    /// Per spec.md §4.4 / §7, equality-mode filters must treat this as an
    /// empty match rather than propagate an error; this variant exists so
    /// that callers who *do* want strict parsing (e.g. repo-metadata
    /// ingestion) can still observe the failure.
    #[error("invalid reldep string: {0:?}")]
    InvalidReldep(String),

    /// An arch string was empty or contained characters not allowed in a
    /// NEVRA arch component.
    #[error("invalid architecture: {0:?}")]
    InvalidArchitecture(String),

    /// A glob pattern failed to compile.
    #[error("invalid glob pattern: {0:?}")]
    InvalidGlob(String),
}
