//! Dependency Store
//!
//! The store owns every piece of mutable graph state: for each explicitly
//! added node, the ordered set of nodes it depends on. Both the entries and
//! each dependency set are keyed by equivalence, so adding an equivalent
//! node twice merges into one entry.
//!
//! Dependencies are stored by value, not just by key. A node that only ever
//! appears as a dependency (an implicit leaf) has no entry of its own but is
//! still recoverable from the dependency sets.

use std::fmt;

use tracing::trace;

use super::key::KeyFn;
use super::keyed::{KeyedMap, KeyedSet};

/// Mapping from node to its ordered, deduplicated dependency set.
pub struct DependencyStore<T, E: KeyFn<T>> {
    entries: KeyedMap<T, KeyedSet<T, E>, E>,
}

impl<T, E> DependencyStore<T, E>
where
    E: KeyFn<T> + Clone,
{
    /// Create an empty store comparing nodes with `key_fn`.
    pub fn new(key_fn: E) -> Self {
        Self {
            entries: KeyedMap::with_key_fn(key_fn),
        }
    }

    /// Get the key function.
    pub fn key_fn(&self) -> &E {
        self.entries.key_fn()
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if `node` has an explicit entry.
    pub fn contains(&self, node: &T) -> bool {
        self.entries.contains(node)
    }

    /// Check if an explicit entry with the given canonical key exists.
    pub fn contains_key(&self, key: &E::Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the dependency set of `node`, if it has an entry.
    pub fn dependencies(&self, node: &T) -> Option<&KeyedSet<T, E>> {
        self.entries.get(node)
    }

    /// Add `node` with `dependencies`, merging into an existing entry.
    ///
    /// Returns `true` if a new entry was created.
    pub fn insert<I>(&mut self, node: T, dependencies: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let existed = self.entries.contains(&node);
        let key_fn = self.entries.key_fn().clone();
        let deps = self
            .entries
            .get_or_insert_with(node, || KeyedSet::with_key_fn(key_fn));

        let before = deps.len();
        deps.extend(dependencies);
        trace!(
            new_entry = !existed,
            added = deps.len() - before,
            total = deps.len(),
            "added dependencies"
        );

        !existed
    }

    /// Remove the entry for `node`. Other entries' dependency sets are left
    /// untouched.
    pub fn remove(&mut self, node: &T) -> bool {
        let removed = self.entries.remove(node).is_some();
        trace!(removed, remaining = self.entries.len(), "removed entry");
        removed
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        trace!(cleared = self.entries.len(), "cleared store");
        self.entries.clear();
    }

    /// Iterate over `(node, dependencies)` in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&T, &KeyedSet<T, E>)> + '_ {
        self.entries.iter()
    }

    /// Iterate over the explicit nodes in insertion order.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.entries.nodes()
    }
}

impl<T, E> Clone for DependencyStore<T, E>
where
    T: Clone,
    E: KeyFn<T> + Clone,
    E::Key: Clone,
{
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T, E> fmt::Debug for DependencyStore<T, E>
where
    T: fmt::Debug,
    E: KeyFn<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyStore")
            .field("entries", &self.entries)
            .finish()
    }
}
