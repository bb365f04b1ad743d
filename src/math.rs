/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// A set which remembers the order in which its elements were inserted. Every element is
/// associated with its position, which never changes as long as nothing is removed.
pub type IndexedSet<S> = indexmap::IndexSet<S, fxhash::FxBuildHasher>;
