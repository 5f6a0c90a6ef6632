//! Topological Graph
//!
//! The graph is the mutation and query surface over a [`DependencyStore`].
//! Iterating it yields every node, explicit or implicit, after all of its
//! dependencies.
//!
//! Mutation never validates anything. Cycles and dangling references are
//! only detected while iterating, at the step where no further node can be
//! resolved.

use std::fmt;
use std::hash::Hash;

use super::error::GraphResult;
use super::iterator::TopologicalIterator;
use super::key::{Identity, KeyFn};
use super::seed::{seed_nodes, SeedOrder};
use super::store::DependencyStore;

/// A mutable dependency graph that iterates in topological order.
///
/// # Example
///
/// ```
/// use topograph_core::graph::TopologicalGraph;
///
/// let mut graph = TopologicalGraph::new();
///
/// graph.add("top1", ["middle1", "bottom1"]);
/// graph.add("middle1", ["bottom1", "bottom2"]);
///
/// let order = graph.sorted().unwrap();
/// assert_eq!(order, vec!["bottom1", "bottom2", "middle1", "top1"]);
///
/// // Introduce a cycle.
/// graph.add("bottom2", ["top1"]);
/// assert!(graph.sorted().is_err());
/// ```
pub struct TopologicalGraph<T, E: KeyFn<T> = Identity> {
    store: DependencyStore<T, E>,
    seed_order: SeedOrder,
}

impl<T> TopologicalGraph<T, Identity>
where
    T: Hash + Eq + Clone,
{
    /// Create an empty graph comparing nodes by value.
    pub fn new() -> Self {
        Self::with_equivalence(Identity)
    }
}

impl<T, E> TopologicalGraph<T, E>
where
    E: KeyFn<T> + Clone,
{
    /// Create an empty graph comparing nodes by the key `key_fn` returns.
    ///
    /// ```
    /// use topograph_core::graph::TopologicalGraph;
    ///
    /// #[derive(Debug, Clone, PartialEq)]
    /// struct Module {
    ///     name: &'static str,
    ///     revision: u32,
    /// }
    ///
    /// let mut graph = TopologicalGraph::with_key_fn(|m: &Module| m.name);
    /// graph.add(Module { name: "app", revision: 1 }, [Module { name: "core", revision: 1 }]);
    ///
    /// // A different instance with the same name is the same node.
    /// assert!(graph.has(&Module { name: "app", revision: 7 }));
    /// ```
    pub fn with_key_fn<K>(key_fn: E) -> Self
    where
        E: Fn(&T) -> K,
        K: Hash + Eq,
    {
        Self::with_equivalence(key_fn)
    }

    /// Create an empty graph using any [`KeyFn`] implementation.
    pub fn with_equivalence(key_fn: E) -> Self {
        Self {
            store: DependencyStore::new(key_fn),
            seed_order: SeedOrder::default(),
        }
    }

    /// Set the strategy used to order the iteration seed.
    pub fn with_seed_order(mut self, seed_order: SeedOrder) -> Self {
        self.seed_order = seed_order;
        self
    }

    /// Get the seed ordering strategy.
    pub fn seed_order(&self) -> SeedOrder {
        self.seed_order
    }

    /// Get the key function.
    pub fn key_fn(&self) -> &E {
        self.store.key_fn()
    }

    /// Number of explicitly added nodes.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if no node has been explicitly added.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Check if `node` was explicitly added.
    ///
    /// Nodes that only appear as dependencies are not counted.
    pub fn has(&self, node: &T) -> bool {
        self.store.contains(node)
    }

    /// Iterate over the current dependencies of `node`.
    ///
    /// Empty if `node` was never added. Call again to restart.
    pub fn get(&self, node: &T) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.store
            .dependencies(node)
            .into_iter()
            .flat_map(|deps| deps.iter())
    }

    /// Add `node` depending on `dependencies`.
    ///
    /// If an equivalent node was already added, the dependencies are merged
    /// into its existing set. Duplicates are ignored.
    pub fn add<I>(&mut self, node: T, dependencies: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.store.insert(node, dependencies);
    }

    /// Remove `node` and its dependency set.
    ///
    /// Other nodes that depend on `node` keep that dependency; `node` then
    /// shows up as an implicit leaf.
    pub fn delete(&mut self, node: &T) -> bool {
        self.store.remove(node)
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.store.clear();
    }
}

impl<T, E> TopologicalGraph<T, E>
where
    T: Clone,
    E: KeyFn<T> + Clone,
{
    /// The seed sequence a new traversal would scan: implicit leaves, then
    /// explicit nodes.
    pub fn nodes(&self) -> Vec<T> {
        seed_nodes(&self.store, self.seed_order)
    }

    /// Start a traversal over a snapshot of the current graph.
    pub fn iter(&self) -> TopologicalIterator<T, E> {
        let key_fn = self.store.key_fn().clone();
        TopologicalIterator::new(self.nodes(), |node| self.snapshot_of(node), key_fn)
    }

    /// Collect a full traversal, or the cycle error that stopped it.
    pub fn sorted(&self) -> GraphResult<Vec<T>> {
        self.iter().collect()
    }

    fn snapshot_of(&self, node: &T) -> Vec<T> {
        self.store
            .dependencies(node)
            .map(|deps| deps.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl<T> Default for TopologicalGraph<T, Identity>
where
    T: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for TopologicalGraph<T, E>
where
    T: Clone,
    E: KeyFn<T> + Clone,
    E::Key: Clone,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            seed_order: self.seed_order,
        }
    }
}

impl<T, E> fmt::Debug for TopologicalGraph<T, E>
where
    T: fmt::Debug,
    E: KeyFn<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopologicalGraph")
            .field("store", &self.store)
            .field("seed_order", &self.seed_order)
            .finish()
    }
}

impl<'a, T, E> IntoIterator for &'a TopologicalGraph<T, E>
where
    T: Clone,
    E: KeyFn<T> + Clone,
{
    type Item = GraphResult<T>;
    type IntoIter = TopologicalIterator<T, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphError;

    #[derive(Debug, Clone, PartialEq)]
    struct Obj {
        key: &'static str,
        tag: u32,
    }

    fn obj(key: &'static str) -> Obj {
        Obj { key, tag: 0 }
    }

    fn keys(nodes: &[Obj]) -> Vec<&'static str> {
        nodes.iter().map(|n| n.key).collect()
    }

    #[test]
    fn add_has_and_get() {
        let mut graph = TopologicalGraph::new();
        graph.add("top1", ["middle1", "bottom1"]);

        assert!(graph.has(&"top1"));
        assert!(!graph.has(&"middle1"));
        assert_eq!(graph.get(&"top1").copied().collect::<Vec<_>>(), vec!["middle1", "bottom1"]);
        assert_eq!(graph.get(&"middle1").count(), 0);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn get_reflects_later_additions() {
        let mut graph = TopologicalGraph::new();
        graph.add(1, [2]);
        let before: Vec<_> = graph.get(&1).copied().collect();

        graph.add(1, [3, 2]);
        let after: Vec<_> = graph.get(&1).copied().collect();

        assert_eq!(before, vec![2]);
        assert_eq!(after, vec![2, 3]);
    }

    #[test]
    fn sorts_sample_chain() {
        let mut graph = TopologicalGraph::new();
        graph.add("top1", ["middle1", "bottom1"]);
        graph.add("middle1", ["bottom1", "bottom2"]);

        let order: Vec<_> = graph.iter().collect::<GraphResult<_>>().unwrap();
        assert_eq!(order, vec!["bottom1", "bottom2", "middle1", "top1"]);
    }

    #[test]
    fn insertion_seed_order_is_also_valid() {
        let mut graph = TopologicalGraph::new().with_seed_order(SeedOrder::Insertion);
        graph.add("top1", ["middle1", "bottom1"]);
        graph.add("middle1", ["bottom1", "bottom2"]);

        assert_eq!(graph.seed_order(), SeedOrder::Insertion);
        assert_eq!(graph.sorted().unwrap(), vec!["bottom1", "bottom2", "middle1", "top1"]);
    }

    #[test]
    fn self_dependency_by_key() {
        let mut graph = TopologicalGraph::with_key_fn(|o: &Obj| o.key);
        graph.add(obj("solo"), [Obj { key: "solo", tag: 1 }]);

        let order = graph.sorted().unwrap();
        assert_eq!(keys(&order), vec!["solo"]);
        assert_eq!(order[0].tag, 0);
    }

    #[test]
    fn two_node_cycle_emits_nothing() {
        let mut graph = TopologicalGraph::new();
        graph.add("a", ["b"]);
        graph.add("b", ["a"]);

        let mut iter = graph.iter();
        assert_eq!(iter.next(), Some(Err(GraphError::cyclic(2))));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn delete_then_re_add_resets_dependencies() {
        let mut graph = TopologicalGraph::new();
        graph.add("a", ["b", "c"]);

        assert!(graph.delete(&"a"));
        assert!(!graph.delete(&"a"));
        graph.add("a", ["d"]);

        assert_eq!(graph.get(&"a").copied().collect::<Vec<_>>(), vec!["d"]);
        assert_eq!(graph.sorted().unwrap(), vec!["d", "a"]);
    }

    #[test]
    fn deleted_dependency_becomes_implicit_leaf() {
        let mut graph = TopologicalGraph::new();
        graph.add("app", ["lib"]);
        graph.add("lib", ["core"]);
        graph.delete(&"lib");

        assert_eq!(graph.sorted().unwrap(), vec!["lib", "app"]);
    }

    #[test]
    fn clear_empties_graph() {
        let mut graph = TopologicalGraph::new();
        graph.add(1, [2, 3]);
        graph.clear();

        assert!(graph.is_empty());
        assert!(graph.nodes().is_empty());
        assert_eq!(graph.sorted().unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn iterator_ignores_later_mutation() {
        let mut graph = TopologicalGraph::new();
        graph.add("b", ["a"]);

        let mut iter = graph.iter();
        graph.add("a", ["b"]);
        graph.add("c", []);

        let order: Vec<_> = iter.by_ref().collect::<GraphResult<_>>().unwrap();
        assert_eq!(order, vec!["a", "b"]);
        assert!(graph.sorted().is_err());
    }

    #[test]
    fn for_loop_over_reference() {
        let mut graph = TopologicalGraph::new();
        graph.add('b', ['a']);

        let mut seen = Vec::new();
        for node in &graph {
            seen.push(node.unwrap());
        }
        assert_eq!(seen, vec!['a', 'b']);
    }
}
