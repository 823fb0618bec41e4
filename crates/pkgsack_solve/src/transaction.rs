//! The transaction a solved [`crate::Goal`] produces: a diff between the
//! installed set and the decided set, each entry tagged with why it's
//! there (spec.md §6 "Reasons").
//!
//! Grounded on `rattler::install::transaction::{Transaction, TransactionOperation}`:
//! the same four-way `Install/Change/Reinstall/Remove` operation shape,
//! computed by diffing a "current" set against a "desired" set rather than
//! walking the solver's internal decision log.

use std::collections::HashMap;

use pkgsack_pool::{PackageSet, Pool, SolvableId};

/// Why a package appears in a transaction (spec.md §6).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Reason {
    /// Named directly by a job the caller staged.
    User,
    /// Pulled in to satisfy a `requires` edge.
    Dep,
    /// Removed as a side effect of cleaning up an orphaned dependency.
    Clean,
    /// Pulled in only via a `recommends`/`supplements` edge.
    WeakDep,
}

/// One change a transaction makes to the installed set.
#[derive(Debug, Clone, Copy)]
pub enum TransactionOperation {
    /// Install a package that was not present before.
    Install(SolvableId),
    /// Replace an old version of a name with a new one.
    Change {
        /// The previously-installed solvable.
        old: SolvableId,
        /// The solvable that replaces it.
        new: SolvableId,
    },
    /// Reinstall the same NEVRA (requested explicitly; no version change).
    Reinstall(SolvableId),
    /// Remove a package entirely.
    Remove(SolvableId),
}

impl TransactionOperation {
    /// The solvable this operation would leave installed, if any.
    pub fn installed(&self) -> Option<SolvableId> {
        match *self {
            TransactionOperation::Install(id) | TransactionOperation::Reinstall(id) => Some(id),
            TransactionOperation::Change { new, .. } => Some(new),
            TransactionOperation::Remove(_) => None,
        }
    }

    /// The solvable this operation removes from the installed set, if any.
    pub fn removed(&self) -> Option<SolvableId> {
        match *self {
            TransactionOperation::Remove(id) => Some(id),
            TransactionOperation::Change { old, .. } => Some(old),
            TransactionOperation::Install(_) | TransactionOperation::Reinstall(_) => None,
        }
    }
}

/// The full set of changes a solved goal would make, in solver transaction
/// order: installs, then obsoletes, then erasures (spec.md §5).
#[derive(Debug, Default)]
pub struct Transaction {
    entries: Vec<(TransactionOperation, Reason)>,
}

impl Transaction {
    /// Diffs `installed` against `decided` (the solver's picked solvable
    /// set), producing one operation per changed name. `installonly_names`
    /// skip old/new pairing: every one of their installed-but-undecided
    /// solvables is a plain `Remove`, every decided-but-uninstalled one a
    /// plain `Install`, since more than one may coexist.
    pub(crate) fn build(
        pool: &Pool,
        installed: &PackageSet,
        decided: &PackageSet,
        installonly_names: &[String],
        user_targeted: &PackageSet,
        reinstall_targeted: &PackageSet,
    ) -> Self {
        let mut by_name: HashMap<&str, (Vec<SolvableId>, Vec<SolvableId>)> = HashMap::new();
        for id in installed.iter() {
            if let Some(record) = pool.solvable(id) {
                by_name.entry(&record.name).or_default().0.push(id);
            }
        }
        for id in decided.iter() {
            if let Some(record) = pool.solvable(id) {
                by_name.entry(&record.name).or_default().1.push(id);
            }
        }

        let mut entries = Vec::new();
        for (name, (mut old_ids, mut new_ids)) in by_name {
            old_ids.sort();
            new_ids.sort();
            let unchanged: Vec<SolvableId> = old_ids.iter().copied().filter(|id| new_ids.contains(id)).collect();
            old_ids.retain(|id| !unchanged.contains(id));
            new_ids.retain(|id| !unchanged.contains(id));

            for &id in &unchanged {
                if reinstall_targeted.contains(id) {
                    entries.push((TransactionOperation::Reinstall(id), reason_for(id, user_targeted)));
                }
            }

            if installonly_names.iter().any(|n| n == name) {
                for &id in &old_ids {
                    entries.push((TransactionOperation::Remove(id), Reason::Clean));
                }
                for &id in &new_ids {
                    entries.push((TransactionOperation::Install(id), reason_for(id, user_targeted)));
                }
                continue;
            }

            match (old_ids.as_slice(), new_ids.as_slice()) {
                ([], []) => {}
                ([], news) => {
                    for &id in news {
                        entries.push((TransactionOperation::Install(id), reason_for(id, user_targeted)));
                    }
                }
                (olds, []) => {
                    for &id in olds {
                        entries.push((TransactionOperation::Remove(id), Reason::Clean));
                    }
                }
                ([old], [new]) => entries.push((
                    TransactionOperation::Change { old: *old, new: *new },
                    reason_for(*new, user_targeted),
                )),
                (olds, news) => {
                    // More than one old/new pair for a non-installonly name
                    // should not happen, but stay well-defined: pair off by
                    // position and fall back to plain remove/install for
                    // any remainder.
                    for (old, new) in olds.iter().zip(news.iter()) {
                        entries.push((
                            TransactionOperation::Change { old: *old, new: *new },
                            reason_for(*new, user_targeted),
                        ));
                    }
                    for &id in olds.iter().skip(news.len()) {
                        entries.push((TransactionOperation::Remove(id), Reason::Clean));
                    }
                    for &id in news.iter().skip(olds.len()) {
                        entries.push((TransactionOperation::Install(id), reason_for(id, user_targeted)));
                    }
                }
            }
        }

        entries.sort_by_key(|(op, _)| match op {
            TransactionOperation::Install(id) => (0u8, *id),
            TransactionOperation::Change { new, .. } => (1u8, *new),
            TransactionOperation::Reinstall(id) => (1u8, *id),
            TransactionOperation::Remove(id) => (2u8, *id),
        });

        Self { entries }
    }

    /// Every operation alongside its reason.
    pub fn entries(&self) -> &[(TransactionOperation, Reason)] {
        &self.entries
    }

    /// Every solvable this transaction would erase or obsolete (a `Remove`
    /// or the `old` half of a `Change`).
    pub fn removed(&self) -> impl Iterator<Item = SolvableId> + '_ {
        self.entries.iter().filter_map(|(op, _)| op.removed())
    }

    /// Every solvable this transaction would leave installed.
    pub fn installed(&self) -> impl Iterator<Item = SolvableId> + '_ {
        self.entries.iter().filter_map(|(op, _)| op.installed())
    }

    /// True if this transaction makes no changes at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn reason_for(id: SolvableId, user_targeted: &PackageSet) -> Reason {
    if user_targeted.contains(id) {
        Reason::User
    } else {
        Reason::Dep
    }
}
