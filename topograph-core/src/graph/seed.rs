//! Seed Ordering
//!
//! Before a traversal starts, the graph derives the sequence in which the
//! iterator scans its snapshot. The seed order never affects correctness,
//! only which of several simultaneously ready nodes is emitted first and how
//! many entries each scan has to look at.
//!
//! # Algorithm
//!
//! 1. Walk every entry's dependency set in store order and collect each
//!    dependency that is not itself an explicit entry (an implicit leaf),
//!    deduplicated by key. Leaves go first: they have no dependencies, so
//!    they are always ready.
//! 2. Append the explicit entries. With [`SeedOrder::LeavesFirst`] they are
//!    appended newest first: nodes added later in a chain tend to have fewer
//!    unresolved dependencies, so scanning them early saves passes. With
//!    [`SeedOrder::Insertion`] they keep their insertion order.

use std::collections::HashSet;

use super::key::KeyFn;
use super::store::DependencyStore;

/// Strategy for ordering explicit entries in the seed sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SeedOrder {
    /// Implicit leaves, then explicit entries newest first.
    #[default]
    LeavesFirst,

    /// Implicit leaves, then explicit entries in insertion order.
    Insertion,
}

/// Compute the seed sequence for `store`.
///
/// Every explicit entry and every implicit leaf appears exactly once.
pub fn seed_nodes<T, E>(store: &DependencyStore<T, E>, order: SeedOrder) -> Vec<T>
where
    T: Clone,
    E: KeyFn<T> + Clone,
{
    let key_fn = store.key_fn();
    let mut scheduled: HashSet<E::Key> = HashSet::new();
    let mut seed = Vec::with_capacity(store.len());

    for (_, deps) in store.iter() {
        for dep in deps.iter() {
            let key = key_fn.key(dep);
            if store.contains_key(&key) || scheduled.contains(&key) {
                continue;
            }
            scheduled.insert(key);
            seed.push(dep.clone());
        }
    }

    match order {
        SeedOrder::LeavesFirst => seed.extend(store.nodes().rev().cloned()),
        SeedOrder::Insertion => seed.extend(store.nodes().cloned()),
    }

    seed
}
