//! Node Equivalence
//!
//! Every graph operation compares nodes through a key function rather than
//! through the node values themselves. Two nodes are the same node iff their
//! keys compare equal.
//!
//! The default key function is [`Identity`], which uses the node itself as
//! its key. Any `Fn(&T) -> K` closure is also a key function, which makes it
//! possible to compare structured values by a single field:
//!
//! ```
//! use topograph_core::graph::KeyFn;
//!
//! struct Plugin {
//!     name: &'static str,
//!     version: u32,
//! }
//!
//! let by_name = |plugin: &Plugin| plugin.name;
//! let a = Plugin { name: "auth", version: 1 };
//! let b = Plugin { name: "auth", version: 2 };
//!
//! assert!(by_name.same(&a, &b));
//! assert_eq!(a.version + 1, b.version);
//! ```

use std::hash::Hash;

/// Maps a node to the canonical key used for equivalence.
pub trait KeyFn<T> {
    /// The canonical comparison key.
    type Key: Hash + Eq;

    /// Compute the key of `node`.
    fn key(&self, node: &T) -> Self::Key;

    /// Check whether two nodes are the same node under this key function.
    fn same(&self, a: &T, b: &T) -> bool {
        self.key(a) == self.key(b)
    }
}

/// The default key function: a node is its own key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T> KeyFn<T> for Identity
where
    T: Hash + Eq + Clone,
{
    type Key = T;

    fn key(&self, node: &T) -> T {
        node.clone()
    }
}

impl<T, K, F> KeyFn<T> for F
where
    F: Fn(&T) -> K,
    K: Hash + Eq,
{
    type Key = K;

    fn key(&self, node: &T) -> K {
        self(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Item {
        key: &'static str,
        payload: u32,
    }

    #[test]
    fn identity_compares_by_value() {
        assert!(Identity.same(&"a", &"a"));
        assert!(!Identity.same(&"a", &"b"));
        assert_eq!(KeyFn::<u32>::key(&Identity, &7), 7);
    }

    #[test]
    fn closure_compares_by_field() {
        let by_key = |item: &Item| item.key;

        let first = Item { key: "bottom1", payload: 1 };
        let second = Item { key: "bottom1", payload: 2 };
        let other = Item { key: "solo", payload: 1 };

        assert!(by_key.same(&first, &second));
        assert!(!by_key.same(&first, &other));
        assert_ne!(first.payload, second.payload);
    }
}
