//! Small integer ids into the pool (spec.md §3, §4.1, Design Notes
//! "interned-id graph instead of pointer graph").

use std::num::NonZeroU32;

/// A solvable id. Non-zero and stable for the lifetime of the sack that
/// owns the pool it was minted from; id 0 and the reserved system-solvable
/// id are never user packages (spec.md §3).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SolvableId(NonZeroU32);

impl SolvableId {
    pub(crate) fn from_index(index: usize) -> Self {
        // index 0 is reserved for the system solvable; user solvables start
        // at index 1, stored as NonZeroU32(index as u32).
        Self(NonZeroU32::new(index as u32).expect("solvable index must be non-zero"))
    }

    /// The dense array index this id corresponds to inside the pool's
    /// solvable arena.
    pub fn index(self) -> usize {
        self.0.get() as usize
    }
}

/// The reserved id representing the "system" pseudo-solvable (the
/// `@System` repo's placeholder, never a concrete installed package).
pub const SYSTEM_SOLVABLE: SolvableId = match NonZeroU32::new(u32::MAX) {
    Some(v) => SolvableId(v),
    None => unreachable!(),
};

/// An interned string id.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct StringId(pub(crate) u32);

/// An interned reldep id (`(name, flags, evr)` triple, spec.md §3).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ReldepId(pub(crate) u32);

/// A repo id.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RepoId(pub(crate) u32);
