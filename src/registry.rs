use tracing::trace;

use crate::{error::ConversionError, math::IndexedSet, state_set::StateSet};

/// An append-only collection of pairwise distinct [`StateSet`]s. Every set that is added
/// receives the next free index, which it keeps for the lifetime of the registry: indices are
/// never reused or renumbered, not even when the underlying storage grows.
///
/// The registry owns its sets, adding a set always stores a copy of it. Sets are found through
/// their hash, so a lookup takes expected constant time (plus the cost of hashing the set).
/// All stored sets have the same capacity, which is given upon creation.
///
/// # Example
/// ```
/// use powerset::prelude::*;
///
/// let mut registry = Registry::new(3);
/// let first = StateSet::singleton(3, 0);
/// assert_eq!(registry.lookup_or_insert(&first).unwrap(), (0, true));
/// assert_eq!(registry.lookup_or_insert(&StateSet::singleton(3, 2)).unwrap(), (1, true));
/// assert_eq!(registry.lookup_or_insert(&first.clone()).unwrap(), (0, false));
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.get(1), Some(&StateSet::singleton(3, 2)));
/// ```
#[derive(Clone, Debug)]
pub struct Registry {
    capacity: usize,
    sets: IndexedSet<StateSet>,
}

impl Registry {
    /// Creates an empty registry for sets of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            sets: IndexedSet::default(),
        }
    }

    /// Returns the index of a set that is equal to `set` if one exists. Otherwise a copy of `set`
    /// is appended and the newly assigned index is returned. The boolean component is true if
    /// and only if the set was inserted.
    ///
    /// Once the storage is full, its capacity is doubled. If that allocation fails, the registry
    /// remains unchanged and [`ConversionError::ResourceExhausted`] is returned.
    ///
    /// # Panics
    /// If the capacity of `set` differs from the one the registry was created with.
    pub fn lookup_or_insert(&mut self, set: &StateSet) -> Result<(usize, bool), ConversionError> {
        self.check_capacity(set);
        if let Some(id) = self.sets.get_index_of(set) {
            return Ok((id, false));
        }

        if self.sets.len() == self.sets.capacity() {
            let additional = self.sets.len().max(1);
            trace!(
                "registry is full with {} sets, reserving space for {additional} more",
                self.sets.len()
            );
            self.sets
                .try_reserve(additional)
                .map_err(|_| ConversionError::ResourceExhausted("the registry of state sets"))?;
        }

        let (id, inserted) = self.sets.insert_full(set.clone());
        debug_assert!(inserted);
        trace!("registered {set:?} with id {id}");
        Ok((id, true))
    }

    /// Returns true if a set equal to `set` is stored.
    pub fn contains(&self, set: &StateSet) -> bool {
        self.sets.contains(set)
    }

    /// Gives the index of the stored set that is equal to `set`, if there is one.
    pub fn id_of(&self, set: &StateSet) -> Option<usize> {
        self.sets.get_index_of(set)
    }

    /// Returns the set stored under `id`.
    pub fn get(&self, id: usize) -> Option<&StateSet> {
        self.sets.get_index(id)
    }

    /// Returns the number of distinct sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns true if no set has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Returns the capacity that all stored sets share.
    pub fn set_capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over all stored sets in the order of their indices.
    pub fn iter(&self) -> impl Iterator<Item = &StateSet> + '_ {
        self.sets.iter()
    }

    fn check_capacity(&self, set: &StateSet) {
        assert_eq!(
            set.capacity(),
            self.capacity,
            "registry holds sets of capacity {}, cannot store set of capacity {}",
            self.capacity,
            set.capacity()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::state_set::StateSet;

    fn set_of(states: &[usize]) -> StateSet {
        let mut set = StateSet::new(16);
        set.extend(states.iter().copied());
        set
    }

    #[test]
    fn indices_are_stable_across_growth() {
        let mut registry = Registry::new(16);
        let sets = (0..16).map(|q| set_of(&[0, q])).collect::<Vec<_>>();
        for (expected, set) in sets.iter().enumerate() {
            assert_eq!(registry.lookup_or_insert(set).unwrap(), (expected, true));
        }
        assert_eq!(registry.len(), 16);
        for (expected, set) in sets.iter().enumerate() {
            assert_eq!(registry.id_of(set), Some(expected));
            assert_eq!(registry.get(expected), Some(set));
        }
    }

    #[test]
    fn lookup_does_not_mutate() {
        let mut registry = Registry::new(16);
        registry.lookup_or_insert(&set_of(&[1, 2])).unwrap();
        registry.lookup_or_insert(&set_of(&[3])).unwrap();

        assert_eq!(
            registry.lookup_or_insert(&set_of(&[2, 1])).unwrap(),
            (0, false)
        );
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&set_of(&[3])));
        assert!(!registry.contains(&set_of(&[4])));
        assert_eq!(registry.id_of(&set_of(&[4])), None);
        assert_eq!(registry.get(2), None);
    }

    #[test]
    fn stored_sets_are_copies() {
        let mut registry = Registry::new(16);
        let mut set = set_of(&[5]);
        registry.lookup_or_insert(&set).unwrap();
        set.insert(6);
        assert_eq!(registry.get(0), Some(&set_of(&[5])));
        assert!(!registry.contains(&set));
    }

    #[test]
    fn empty_set_can_be_registered() {
        let mut registry = Registry::new(16);
        assert!(registry.is_empty());
        assert_eq!(
            registry.lookup_or_insert(&StateSet::new(16)).unwrap(),
            (0, true)
        );
        assert_eq!(registry.iter().count(), 1);
    }

    #[test]
    #[should_panic]
    fn mismatched_capacity_panics() {
        let mut registry = Registry::new(16);
        registry.lookup_or_insert(&StateSet::new(8)).unwrap();
    }
}
