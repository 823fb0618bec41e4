//! A single `(keyname, cmp-type, match-type, matches[])` filter (spec.md
//! §3 Query).

use pkgsack_pool::PackageSet;
use pkgsack_types::reldep::Reldep;

use crate::cmp::CmpType;
use crate::keyname::Keyname;

/// One OR-within-filter match value. The source's tagged union
/// `(kind, {num|str|pkgset|reldep})` becomes this sum type (Design Notes
/// §9 "tagged variant for filter matches").
#[derive(Debug, Clone)]
pub enum MatchValue {
    /// A string to compare against a free-string/identity/evr-ordered key.
    Str(String),
    /// An integer to compare against a numeric key (`epoch`).
    Num(i64),
    /// A pre-built package set, for `pkg`/`obsoletes(pkg)` filters.
    Pkg(PackageSet),
    /// An already-parsed reldep, for `filter_reldep`/`filter_provides`.
    Reldep(Reldep),
}

/// A filter as accumulated by [`crate::Query`]: tests `key` with `cmp`
/// against the OR of `matches`.
#[derive(Debug, Clone)]
pub struct Filter {
    pub(crate) key: Keyname,
    pub(crate) cmp: CmpType,
    pub(crate) matches: Vec<MatchValue>,
}

impl Filter {
    pub(crate) fn new(key: Keyname, cmp: CmpType, matches: Vec<MatchValue>) -> Self {
        Self { key, cmp, matches }
    }
}
