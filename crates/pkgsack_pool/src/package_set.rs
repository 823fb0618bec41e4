//! Dense bitmap over the solvable-id space (spec.md §3 "PackageSet", §4.1).
//!
//! Grounded on the bitmap-over-small-integer-ids approach `rattler`'s SAT
//! layer uses internally for solvable sets, here built directly on
//! `bitvec` rather than re-deriving a bespoke bitset.

use bitvec::prelude::*;

use crate::ids::SolvableId;

/// A set of solvables, represented as a growable bitmap keyed by
/// [`SolvableId::index`]. Cloning is O(n) in the backing word count, which
/// is the expected cost model for a "copy the universe, then filter"
/// pipeline (spec.md §4.4).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSet {
    bits: BitVec,
}

impl PackageSet {
    /// An empty set with no capacity reserved.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty set with room for `capacity` solvable ids without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(capacity),
        }
    }

    fn ensure_len(&mut self, index: usize) {
        if index >= self.bits.len() {
            self.bits.resize(index + 1, false);
        }
    }

    /// Adds a solvable to the set.
    pub fn insert(&mut self, id: SolvableId) {
        let idx = id.index();
        self.ensure_len(idx);
        self.bits.set(idx, true);
    }

    /// Removes a solvable from the set.
    pub fn remove(&mut self, id: SolvableId) {
        let idx = id.index();
        if idx < self.bits.len() {
            self.bits.set(idx, false);
        }
    }

    /// Whether the set contains the given solvable.
    pub fn contains(&self, id: SolvableId) -> bool {
        self.bits.get(id.index()).map(|b| *b).unwrap_or(false)
    }

    /// The number of solvables in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// In-place union.
    pub fn union_with(&mut self, other: &PackageSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.resize(other.bits.len(), false);
        }
        for (mut bit, other_bit) in self.bits.iter_mut().zip(other.bits.iter()) {
            *bit = *bit || *other_bit;
        }
    }

    /// In-place intersection.
    pub fn intersect_with(&mut self, other: &PackageSet) {
        for i in 0..self.bits.len() {
            let keep = self.bits[i] && other.bits.get(i).map(|b| *b).unwrap_or(false);
            self.bits.set(i, keep);
        }
    }

    /// In-place set difference: removes every member of `other` from self.
    pub fn subtract(&mut self, other: &PackageSet) {
        for i in 0..self.bits.len().min(other.bits.len()) {
            if other.bits[i] {
                self.bits.set(i, false);
            }
        }
    }

    /// Iterates over the solvable ids currently in the set, in ascending id
    /// order (spec.md §4.1 "iteration order is always ascending solvable
    /// id" for determinism).
    pub fn iter(&self) -> impl Iterator<Item = SolvableId> + '_ {
        self.bits
            .iter_ones()
            .filter(|&idx| idx != 0)
            .map(SolvableId::from_index)
    }
}

impl FromIterator<SolvableId> for PackageSet {
    fn from_iter<T: IntoIterator<Item = SolvableId>>(iter: T) -> Self {
        let mut set = PackageSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> SolvableId {
        SolvableId::from_index(i)
    }

    #[test]
    fn test_insert_contains_remove() {
        let mut set = PackageSet::new();
        assert!(!set.contains(id(3)));
        set.insert(id(3));
        assert!(set.contains(id(3)));
        set.remove(id(3));
        assert!(!set.contains(id(3)));
    }

    #[test]
    fn test_union_intersect_subtract() {
        let a: PackageSet = [id(1), id(2), id(3)].into_iter().collect();
        let b: PackageSet = [id(2), id(3), id(4)].into_iter().collect();

        let mut u = a.clone();
        u.union_with(&b);
        assert_eq!(u.iter().collect::<Vec<_>>(), vec![id(1), id(2), id(3), id(4)]);

        let mut i = a.clone();
        i.intersect_with(&b);
        assert_eq!(i.iter().collect::<Vec<_>>(), vec![id(2), id(3)]);

        let mut s = a.clone();
        s.subtract(&b);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![id(1)]);
    }

    #[test]
    fn test_iteration_order_is_ascending() {
        let set: PackageSet = [id(5), id(1), id(3)].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![id(1), id(3), id(5)]);
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut set = PackageSet::new();
        assert!(set.is_empty());
        set.insert(id(7));
        assert_eq!(set.len(), 1);
    }
}
