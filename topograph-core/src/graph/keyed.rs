//! Equivalence-Aware Containers
//!
//! Insertion-ordered map and set types that look entries up by a node's
//! [`KeyFn`] key instead of by the node value. They are thin adapters over
//! [`indexmap::IndexMap`]: the map stores `key -> (node, value)` so the
//! original node value is kept alongside its canonical key.
//!
//! Removal uses `shift_remove`, which keeps the relative order of the
//! remaining entries. The topological iterator relies on this for stable
//! tie-breaks.

use std::fmt;

use indexmap::IndexMap;

use super::key::KeyFn;

/// An insertion-ordered map from node to value, keyed by equivalence.
pub struct KeyedMap<T, V, E: KeyFn<T>> {
    key_fn: E,
    entries: IndexMap<E::Key, (T, V)>,
}

impl<T, V, E: KeyFn<T>> KeyedMap<T, V, E> {
    /// Create an empty map using the given key function.
    pub fn with_key_fn(key_fn: E) -> Self {
        Self {
            key_fn,
            entries: IndexMap::new(),
        }
    }

    /// Get the key function.
    pub fn key_fn(&self) -> &E {
        &self.key_fn
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if an entry equivalent to `node` exists.
    pub fn contains(&self, node: &T) -> bool {
        self.entries.contains_key(&self.key_fn.key(node))
    }

    /// Check if an entry with the given canonical key exists.
    pub fn contains_key(&self, key: &E::Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the value stored for `node`.
    pub fn get(&self, node: &T) -> Option<&V> {
        self.entries.get(&self.key_fn.key(node)).map(|(_, value)| value)
    }

    /// Get a mutable reference to the value stored for `node`.
    pub fn get_mut(&mut self, node: &T) -> Option<&mut V> {
        self.entries
            .get_mut(&self.key_fn.key(node))
            .map(|(_, value)| value)
    }

    /// Insert or replace the value for `node`.
    ///
    /// When an equivalent entry already exists, the stored node and its
    /// position are kept and only the value is replaced. The previous value
    /// is returned in that case.
    pub fn insert(&mut self, node: T, value: V) -> Option<V> {
        let key = self.key_fn.key(&node);
        match self.entries.get_mut(&key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.insert(key, (node, value));
                None
            }
        }
    }

    /// Get the value for `node`, inserting one built by `default` first if
    /// no equivalent entry exists.
    pub fn get_or_insert_with(&mut self, node: T, default: impl FnOnce() -> V) -> &mut V {
        let key = self.key_fn.key(&node);
        let (_, value) = self
            .entries
            .entry(key)
            .or_insert_with(|| (node, default()));
        value
    }

    /// Remove the entry for `node`, preserving the order of the others.
    pub fn remove(&mut self, node: &T) -> Option<(T, V)> {
        self.entries.shift_remove(&self.key_fn.key(node))
    }

    /// Remove the entry at `index`, preserving the order of the others.
    pub fn remove_index(&mut self, index: usize) -> Option<(T, V)> {
        self.entries.shift_remove_index(index).map(|(_, entry)| entry)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over `(node, value)` pairs in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&T, &V)> + ExactSizeIterator + '_ {
        self.entries.values().map(|(node, value)| (node, value))
    }

    /// Iterate over the stored nodes in insertion order.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.entries.values().map(|(node, _)| node)
    }

    /// Iterate over the canonical keys in insertion order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &E::Key> + ExactSizeIterator + '_ {
        self.entries.keys()
    }

    /// Iterate over the values in insertion order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.entries.values().map(|(_, value)| value)
    }
}

impl<T, V, E> Clone for KeyedMap<T, V, E>
where
    T: Clone,
    V: Clone,
    E: KeyFn<T> + Clone,
    E::Key: Clone,
{
    fn clone(&self) -> Self {
        Self {
            key_fn: self.key_fn.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl<T, V, E> fmt::Debug for KeyedMap<T, V, E>
where
    T: fmt::Debug,
    V: fmt::Debug,
    E: KeyFn<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// An insertion-ordered set of nodes, deduplicated by equivalence.
pub struct KeyedSet<T, E: KeyFn<T>> {
    map: KeyedMap<T, (), E>,
}

impl<T, E: KeyFn<T>> KeyedSet<T, E> {
    /// Create an empty set using the given key function.
    pub fn with_key_fn(key_fn: E) -> Self {
        Self {
            map: KeyedMap::with_key_fn(key_fn),
        }
    }

    /// Number of distinct nodes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Check if a node equivalent to `node` is present.
    pub fn contains(&self, node: &T) -> bool {
        self.map.contains(node)
    }

    /// Add `node` unless an equivalent node is already present.
    ///
    /// Returns `true` if the node was added.
    pub fn insert(&mut self, node: T) -> bool {
        self.map.insert(node, ()).is_none()
    }

    /// Remove the node equivalent to `node`.
    pub fn remove(&mut self, node: &T) -> bool {
        self.map.remove(node).is_some()
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterate over the nodes in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.map.nodes()
    }
}

impl<T, E> Extend<T> for KeyedSet<T, E>
where
    E: KeyFn<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for node in iter {
            self.insert(node);
        }
    }
}

impl<T, E> Clone for KeyedSet<T, E>
where
    T: Clone,
    E: KeyFn<T> + Clone,
    E::Key: Clone,
{
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<T, E> fmt::Debug for KeyedSet<T, E>
where
    T: fmt::Debug,
    E: KeyFn<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
