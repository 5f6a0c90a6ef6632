//! Error types for graph traversal
//!
//! Mutating a graph never fails; invalid graphs are only detected lazily,
//! while a [`TopologicalIterator`](super::TopologicalIterator) is being
//! advanced. A missing dependency and a genuine cycle are reported the same
//! way.

use thiserror::Error;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while ordering a dependency graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// No remaining node had all of its dependencies resolved.
    #[error(
        "Cyclic dependencies: cannot resolve the provided dependency graph ({remaining} unresolved nodes)"
    )]
    CyclicDependency {
        /// Number of nodes left in the snapshot when the scan stalled.
        remaining: usize,
    },
}

impl GraphError {
    /// Creates a cyclic dependency error.
    pub fn cyclic(remaining: usize) -> Self {
        Self::CyclicDependency { remaining }
    }

    /// Check whether this error reports a dependency cycle.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::CyclicDependency { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyclic_error_message() {
        let err = GraphError::cyclic(2);

        assert!(err.is_cyclic());
        assert_eq!(
            err.to_string(),
            "Cyclic dependencies: cannot resolve the provided dependency graph (2 unresolved nodes)"
        );
    }
}
