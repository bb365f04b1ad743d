use bit_set::BitSet;
use itertools::Itertools;

use crate::automaton::StateIndex;

/// Represents a subset of the states `0..capacity` of some automaton as a bit-vector. The
/// capacity is fixed upon creation, it is always the number of states of the automaton that
/// the set refers to. Accessing a state at or beyond the capacity is a programming error and
/// panics, a set never grows silently.
///
/// Two sets are equal if and only if they have the same capacity and contain the same states.
/// Cloning a set produces an independent deep copy.
///
/// # Example
/// ```
/// use powerset::prelude::*;
///
/// let mut set = StateSet::new(4);
/// assert!(set.is_empty());
/// set.insert(2);
/// set.insert(0);
/// assert!(set.contains(2) && !set.contains(1));
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 2]);
/// assert_eq!(format!("{set:?}"), "{0, 2}");
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct StateSet {
    capacity: usize,
    states: BitSet,
}

impl StateSet {
    /// Creates an empty set over the states `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            states: BitSet::with_capacity(capacity),
        }
    }

    /// Creates a set over the states `0..capacity` which contains only `state`.
    pub fn singleton(capacity: usize, state: StateIndex) -> Self {
        let mut set = Self::new(capacity);
        set.insert(state);
        set
    }

    /// Returns the number of states the set can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if `state` is a member of the set.
    pub fn contains(&self, state: StateIndex) -> bool {
        self.check_bounds(state);
        self.states.contains(state)
    }

    /// Adds `state` to the set. Returns true if it was not present before, inserting the same
    /// state twice leaves the set unchanged.
    pub fn insert(&mut self, state: StateIndex) -> bool {
        self.check_bounds(state);
        self.states.insert(state)
    }

    /// Returns true if the set does not contain any state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the number of states in the set.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Iterates over the members of the set in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.states.iter()
    }

    /// Adds all states of `other` to `self`. Both sets must have the same capacity.
    pub fn union_with(&mut self, other: &StateSet) {
        assert_eq!(
            self.capacity, other.capacity,
            "cannot unite sets of different capacity"
        );
        self.states.union_with(&other.states);
    }

    fn check_bounds(&self, state: StateIndex) {
        assert!(
            state < self.capacity,
            "state {state} is out of bounds, the set only holds {} states",
            self.capacity
        );
    }
}

impl Extend<StateIndex> for StateSet {
    fn extend<T: IntoIterator<Item = StateIndex>>(&mut self, iter: T) {
        for state in iter {
            self.insert(state);
        }
    }
}

impl std::fmt::Debug for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "∅")
        } else {
            write!(f, "{{{}}}", self.iter().join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StateSet;

    #[test]
    fn insertion_is_idempotent() {
        let mut set = StateSet::new(70);
        assert!(set.insert(65));
        assert!(!set.insert(65));
        assert_eq!(set.len(), 1);
        assert!(set.contains(65));
        assert!(!set.contains(1));
    }

    #[test]
    fn equality_is_structural() {
        let mut left = StateSet::new(130);
        left.extend([129, 3, 64]);
        let mut right = StateSet::new(130);
        right.extend([64, 129, 3, 3]);
        assert_eq!(left, right);

        right.insert(0);
        assert_ne!(left, right);
    }

    #[test]
    fn capacity_takes_part_in_equality() {
        let first = StateSet::singleton(3, 1);
        let second = StateSet::singleton(100, 1);
        assert_ne!(first, second);
        assert_ne!(StateSet::new(3), StateSet::new(4));
        assert_eq!(StateSet::new(0), StateSet::new(0));
    }

    #[test]
    fn clones_are_independent() {
        let original = StateSet::singleton(8, 4);
        let mut copy = original.clone();
        copy.insert(7);
        assert!(!original.contains(7));
        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn emptiness() {
        let mut set = StateSet::new(5);
        assert!(set.is_empty());
        assert_eq!(format!("{set:?}"), "∅");
        set.insert(4);
        assert!(!set.is_empty());
    }

    #[test]
    fn union() {
        let mut left = StateSet::singleton(6, 1);
        left.union_with(&StateSet::singleton(6, 5));
        assert_eq!(left.iter().collect::<Vec<_>>(), vec![1, 5]);
    }

    #[test]
    #[should_panic]
    fn inserting_beyond_capacity_panics() {
        let mut set = StateSet::new(3);
        set.insert(3);
    }

    #[test]
    #[should_panic]
    fn uniting_different_capacities_panics() {
        let mut set = StateSet::new(3);
        set.union_with(&StateSet::new(4));
    }
}
