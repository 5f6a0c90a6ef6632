//! Topological Iterator
//!
//! A one-shot, pull-based iterator that yields nodes only once all of their
//! dependencies have been yielded.
//!
//! # Algorithm
//!
//! At construction the iterator captures a snapshot: for every seed node, the
//! list of its dependencies, materialized once through the resolver. Each
//! call to `next`:
//!
//! 1. Returns `None` if the snapshot is empty.
//! 2. Scans the remaining entries in seed order and takes the first one whose
//!    dependencies are all resolved. A dependency equivalent to the node
//!    itself counts as resolved, so self-dependency is tolerated.
//! 3. Fails with [`GraphError::CyclicDependency`] if no entry is ready.
//!
//! The scan restarts from the front on every call, so ties between ready
//! nodes always go to the earliest seed position. Each step is O(n) and a
//! full traversal is O(n²), which is fine for the small graphs this is meant
//! for (plugin or module load ordering).
//!
//! Because the snapshot is owned, mutating the graph after creating the
//! iterator has no effect on it.

use std::collections::HashSet;
use std::fmt;
use std::iter::FusedIterator;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use super::error::{GraphError, GraphResult};
use super::key::KeyFn;
use super::keyed::KeyedMap;

/// Captured dependency list of a single node.
type DepList<T> = SmallVec<[T; 4]>;

/// Lifecycle of a [`TopologicalIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterState {
    /// Nodes remain to be emitted.
    Active,

    /// Every node has been emitted.
    Exhausted,

    /// A cycle was detected. No further nodes will be emitted.
    Failed,
}

/// Iterator yielding nodes in dependency order.
///
/// Yields `Ok(node)` for each emitted node. If the remaining nodes cannot be
/// resolved, yields a single `Err(GraphError::CyclicDependency)` and then
/// `None` forever.
pub struct TopologicalIterator<T, E: KeyFn<T>> {
    key_fn: E,
    /// Keys of nodes already emitted.
    resolved: HashSet<E::Key>,
    /// Nodes not yet emitted, in seed order.
    remaining: KeyedMap<T, DepList<T>, E>,
    state: IterState,
}

impl<T, E> TopologicalIterator<T, E>
where
    E: KeyFn<T> + Clone,
{
    /// Create an iterator over `seed`, asking `resolver` once per node for
    /// its dependencies.
    ///
    /// Seed nodes equivalent to an earlier seed node are ignored.
    pub fn new<S, R, I>(seed: S, mut resolver: R, key_fn: E) -> Self
    where
        S: IntoIterator<Item = T>,
        R: FnMut(&T) -> I,
        I: IntoIterator<Item = T>,
    {
        let mut remaining = KeyedMap::with_key_fn(key_fn.clone());
        for node in seed {
            if remaining.contains(&node) {
                continue;
            }
            let deps: DepList<T> = resolver(&node).into_iter().collect();
            remaining.insert(node, deps);
        }

        debug!(nodes = remaining.len(), "captured topological snapshot");

        let state = if remaining.is_empty() {
            IterState::Exhausted
        } else {
            IterState::Active
        };

        Self {
            key_fn,
            resolved: HashSet::with_capacity(remaining.len()),
            remaining,
            state,
        }
    }

    /// Get the current lifecycle state.
    pub fn state(&self) -> IterState {
        self.state
    }

    /// Number of nodes not yet emitted.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Number of nodes already emitted.
    pub fn resolved(&self) -> usize {
        self.resolved.len()
    }

    /// Find the first remaining entry whose dependencies are all resolved.
    fn next_ready(&self) -> Option<usize> {
        self.remaining.iter().position(|(node, deps)| {
            let node_key = self.key_fn.key(node);
            deps.iter().all(|dep| {
                let dep_key = self.key_fn.key(dep);
                dep_key == node_key || self.resolved.contains(&dep_key)
            })
        })
    }
}

impl<T, E> Iterator for TopologicalIterator<T, E>
where
    E: KeyFn<T> + Clone,
{
    type Item = GraphResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != IterState::Active {
            return None;
        }

        if self.remaining.is_empty() {
            debug!(emitted = self.resolved.len(), "topological traversal finished");
            self.state = IterState::Exhausted;
            return None;
        }

        let Some(index) = self.next_ready() else {
            let remaining = self.remaining.len();
            warn!(remaining, "cyclic dependencies detected");
            self.state = IterState::Failed;
            return Some(Err(GraphError::cyclic(remaining)));
        };

        let (node, _) = self.remaining.remove_index(index)?;
        self.resolved.insert(self.key_fn.key(&node));
        trace!(
            position = index,
            remaining = self.remaining.len(),
            "emitting node"
        );

        Some(Ok(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            // Every remaining node, or fewer nodes plus one error.
            IterState::Active => (0, Some(self.remaining.len() + 1)),
            IterState::Exhausted | IterState::Failed => (0, Some(0)),
        }
    }
}

impl<T, E> FusedIterator for TopologicalIterator<T, E> where E: KeyFn<T> + Clone {}

impl<T, E> fmt::Debug for TopologicalIterator<T, E>
where
    T: fmt::Debug,
    E: KeyFn<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopologicalIterator")
            .field("state", &self.state)
            .field("resolved", &self.resolved.len())
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::key::Identity;
    use std::collections::HashMap;

    fn edges(
        pairs: Vec<(&'static str, Vec<&'static str>)>,
    ) -> HashMap<&'static str, Vec<&'static str>> {
        pairs.into_iter().collect()
    }

    fn iterate(
        seed: &[&'static str],
        graph: &HashMap<&'static str, Vec<&'static str>>,
    ) -> TopologicalIterator<&'static str, Identity> {
        TopologicalIterator::new(
            seed.iter().copied(),
            |node: &&'static str| graph.get(node).cloned().unwrap_or_default(),
            Identity,
        )
    }

    #[test]
    fn empty_seed_is_exhausted() {
        let graph = edges(vec![]);
        let mut iter = iterate(&[], &graph);

        assert_eq!(iter.state(), IterState::Exhausted);
        assert!(iter.next().is_none());
    }

    #[test]
    fn emits_dependencies_first() {
        let graph = edges(vec![("c", vec!["b"]), ("b", vec!["a"])]);
        let order: GraphResult<Vec<_>> = iterate(&["c", "b", "a"], &graph).collect();

        assert_eq!(order.unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn ties_go_to_earliest_seed_position() {
        let graph = edges(vec![("x", vec![]), ("y", vec![]), ("z", vec![])]);
        let order: GraphResult<Vec<_>> = iterate(&["z", "x", "y"], &graph).collect();

        assert_eq!(order.unwrap(), vec!["z", "x", "y"]);
    }

    #[test]
    fn rescans_from_front_after_each_emission() {
        // "late" becomes ready only after "early" is emitted and must then
        // be preferred over "last", which sits after it in seed order.
        let graph = edges(vec![("late", vec!["early"]), ("early", vec![]), ("last", vec![])]);
        let order: GraphResult<Vec<_>> = iterate(&["late", "early", "last"], &graph).collect();

        assert_eq!(order.unwrap(), vec!["early", "late", "last"]);
    }

    #[test]
    fn self_dependency_is_not_a_cycle() {
        let graph = edges(vec![("solo", vec!["solo"])]);
        let order: GraphResult<Vec<_>> = iterate(&["solo"], &graph).collect();

        assert_eq!(order.unwrap(), vec!["solo"]);
    }

    #[test]
    fn cycle_fails_then_fuses() {
        let graph = edges(vec![("a", vec!["b"]), ("b", vec!["a"])]);
        let mut iter = iterate(&["a", "b"], &graph);

        assert_eq!(iter.next(), Some(Err(GraphError::cyclic(2))));
        assert_eq!(iter.state(), IterState::Failed);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.remaining(), 2);
    }

    #[test]
    fn ready_nodes_are_emitted_before_cycle_surfaces() {
        let graph = edges(vec![("a", vec!["b"]), ("b", vec!["a"]), ("free", vec![])]);
        let mut iter = iterate(&["a", "b", "free"], &graph);

        assert_eq!(iter.next(), Some(Ok("free")));
        assert_eq!(iter.next(), Some(Err(GraphError::cyclic(2))));
        assert_eq!(iter.resolved(), 1);
    }

    #[test]
    fn unknown_dependency_is_reported_as_cycle() {
        let graph = edges(vec![("a", vec!["ghost"])]);
        let result: GraphResult<Vec<_>> = iterate(&["a"], &graph).collect();

        assert_eq!(result, Err(GraphError::cyclic(1)));
    }

    #[test]
    fn duplicate_seed_nodes_are_collapsed() {
        let graph = edges(vec![("a", vec![])]);
        let mut calls = 0;
        let iter = TopologicalIterator::new(
            ["a", "a", "a"],
            |node: &&'static str| {
                calls += 1;
                graph.get(node).cloned().unwrap_or_default()
            },
            Identity,
        );

        assert_eq!(iter.remaining(), 1);
        assert_eq!(calls, 1);
    }

    #[test]
    fn size_hint_bounds_output() {
        let graph = edges(vec![("a", vec![]), ("b", vec!["a"])]);
        let mut iter = iterate(&["a", "b"], &graph);

        assert_eq!(iter.size_hint(), (0, Some(3)));
        iter.by_ref().for_each(drop);
        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert_eq!(iter.state(), IterState::Exhausted);
    }
}
