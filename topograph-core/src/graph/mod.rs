//! Dependency Graph
//!
//! This module implements a mutable dependency graph whose iteration order is
//! topological: every node is emitted only after all of the nodes it depends
//! on.
//!
//! # Overview
//!
//! - Nodes are arbitrary values. Identity is decided by a key function
//!   ([`KeyFn`]), by default the value itself ([`Identity`]).
//! - An edge `node -> dep` means `dep` must be emitted before `node`.
//! - A node that only ever appears as a dependency (an implicit leaf) is
//!   still emitted.
//! - A node may depend on itself; that is not a cycle.
//!
//! # Design Decisions
//!
//! 1. Mutation is unchecked. Cycles are detected lazily, by the iterator, at
//!    the first step where no remaining node is ready.
//!
//! 2. Every traversal captures an owned snapshot of the graph. The graph can
//!    be mutated while iterators are alive and each iterator keeps seeing the
//!    graph as it was when it was created.
//!
//! 3. All containers preserve insertion order, so the emission order for a
//!    given sequence of mutations is fully deterministic.

mod error;
mod iterator;
mod key;
mod keyed;
mod seed;
mod store;
mod topological_graph;


pub use error::{GraphError, GraphResult};
pub use iterator::{IterState, TopologicalIterator};
pub use key::{Identity, KeyFn};
pub use keyed::{KeyedMap, KeyedSet};
pub use seed::{seed_nodes, SeedOrder};
pub use store::DependencyStore;
pub use topological_graph::TopologicalGraph;
