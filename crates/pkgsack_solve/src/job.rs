//! Staged goal actions (spec.md §4.6 "job atoms", §4.7 step 2).
//!
//! A [`crate::Goal`] accumulates [`Job`]s without resolving their
//! selectors; resolution happens inside `Goal::run`, after `considered` has
//! been recomputed (spec.md §4.7 step 1), so a job always sees fresh data.

use pkgsack_query::Selector;

/// What a staged job asks the solver to do.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum JobKind {
    /// Require a candidate of the selected packages' name(s) to be
    /// installed.
    Install,
    /// Require the selected packages to be absent from the result.
    Erase {
        /// Also drop packages that exist only to satisfy the erased ones
        /// (spec.md §4.7 step 7 / S4).
        cleandeps: bool,
    },
    /// Require the newest available candidate among the selected names.
    Upgrade,
    /// Like upgrade, but also allows vendor/arch changes.
    Distupgrade,
    /// Require an older candidate than what is installed.
    Downgrade,
    /// Require the exact installed NEVRA again.
    Reinstall,
}

/// One staged action.
#[derive(Debug, Clone)]
pub struct Job {
    pub(crate) kind: JobKind,
    pub(crate) selector: Selector,
}

impl Job {
    pub(crate) fn new(kind: JobKind, selector: Selector) -> Self {
        Self { kind, selector }
    }
}
