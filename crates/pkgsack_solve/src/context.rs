//! What a [`crate::Goal`] needs from its owning sack, beyond the
//! query-level [`pkgsack_query::SackView`] (spec.md §4.7).

use pkgsack_pool::{PackageSet, RepoId, SolvableId};
use pkgsack_query::SackView;

/// Goal-level view of a sack: installed repo, protected-package bitmap,
/// installonly configuration and the running kernel, on top of the
/// query-level pool/considered/advisories view.
pub trait GoalContext: SackView {
    /// The sack's installed (`@System`) repo, if any.
    fn installed_repo(&self) -> Option<RepoId>;

    /// Solvables that must never be erased or obsoleted by a successful
    /// goal (spec.md §4.7 step 7).
    fn protected(&self) -> &PackageSet;

    /// Package names for which more than one version may be installed at
    /// once (spec.md §4.7 step 2 `MULTIVERSION`).
    fn installonly_names(&self) -> &[String];

    /// Maximum number of simultaneously-installed versions per installonly
    /// name; `0` means unlimited (spec.md §4.7 step 5, §8 invariant 9).
    fn installonly_limit(&self) -> u32;

    /// The solvable for the currently booted kernel, if known. Used to
    /// break ties so the running kernel is never trimmed away (spec.md §4.7
    /// step 5, §8 S5).
    fn running_kernel(&self) -> Option<SolvableId>;
}
