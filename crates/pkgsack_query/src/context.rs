//! The view a [`crate::Query`] needs of its owning sack.
//!
//! `pkgsack_query` cannot depend on `pkgsack` (the top crate depends on
//! `pkgsack_query`, not the reverse), so the dependency runs through a
//! trait, the same way `rattler_solve::resolvo`'s `DependencyProvider`
//! decouples the solver from any concrete sack type.

use pkgsack_pool::{PackageSet, Pool};
use pkgsack_types::advisory::Advisory;

/// Everything a [`crate::Query`] or [`crate::Selector`] needs to read from
/// its sack. Implemented by `pkgsack::Sack`.
pub trait SackView {
    /// The pool backing this sack.
    fn pool(&self) -> &Pool;

    /// The sack's current `considered` bitmap (spec.md §3: `includes ∧
    /// ¬excludes`, or `all ∧ ¬excludes` when includes is empty).
    fn considered(&self) -> PackageSet;

    /// Advisory (errata) records loaded into this sack (spec.md §4.8).
    fn advisories(&self) -> &[Advisory];
}
