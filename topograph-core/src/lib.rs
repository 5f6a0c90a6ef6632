//! Topograph Core
//!
//! This crate provides lazy topological ordering over a mutable dependency
//! graph. It implements:
//!
//! - A dependency graph over arbitrary values with pluggable node equivalence
//! - A pull-based iterator that emits dependencies before their dependents
//! - Eager cycle detection that fails instead of looping
//!
//! # Architecture
//!
//! - `graph`: the graph, its dependency store, the seed ordering, and the
//!   topological iterator
//!
//! # Example
//!
//! ```rust
//! use topograph_core::graph::{GraphError, TopologicalGraph};
//!
//! let mut plugins = TopologicalGraph::new();
//! plugins.add("ui", ["render", "config"]);
//! plugins.add("render", ["config"]);
//!
//! let order = plugins.sorted()?;
//! assert_eq!(order, vec!["config", "render", "ui"]);
//!
//! // Dependencies are only checked while iterating.
//! plugins.add("config", ["ui"]);
//! assert!(plugins.sorted().is_err());
//! # Ok::<(), GraphError>(())
//! ```

pub mod graph;

pub use graph::{GraphError, GraphResult, TopologicalGraph, TopologicalIterator};
