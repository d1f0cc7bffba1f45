//! # radix-rs
//!
//! A compressed prefix tree (radix tree) over byte-string keys.
//!
//! Nodes are stored in first-child/next-sibling form: every node holds one
//! segment of bytes, a link to the list of segments continuing its path, and a
//! link to the next alternative at its own position. Shared prefixes are
//! stored once; a branch point is introduced by splitting a segment and
//! removed again by joining it with its only child.
//!
//! The tree is a pure key set. An entry is the concatenation of segments from
//! the root down to a leaf. Inserting a key that is a prefix of an existing
//! path adds nothing, and removing a key drops every entry extending it.
//!
//! ## Example
//!
//! ```rust
//! use radix_rs::RadixTree;
//!
//! let mut tree = RadixTree::new();
//! tree.insert(b"com.google");
//! tree.insert(b"com.amazon");
//! tree.insert(b"it.amazon");
//!
//! assert_eq!(tree.count_entries(), 3);
//! assert!(tree.find_exact(b"com.amazon").is_some());
//!
//! // Prefix lookup lands on the shared `com.` segment.
//! let node = tree.find(b"com").unwrap();
//! assert_eq!(node.key(), b"com.");
//! assert_eq!(node.child().unwrap().count_entries(), 2);
//!
//! assert_eq!(tree.remove(b"com."), 2);
//! assert_eq!(tree.count_entries(), 1);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

mod error;
mod iter;
mod node;
pub mod source;

pub use error::{Error, Result};
pub use iter::Entries;
pub use node::{common_prefix_len, Node, Structure};
pub use source::{KeySource, LoadStats};

use std::fmt;

use tracing::trace;

/// Compressed prefix tree over byte-string keys.
#[derive(Clone, Default)]
pub struct RadixTree {
    root: Option<Box<Node>>,
}

impl RadixTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Create a tree whose root holds `key`, which may be empty.
    pub fn with_root(key: &[u8]) -> Self {
        Self {
            root: Some(Box::new(Node::new(key))),
        }
    }

    /// First node of the top-level sibling chain.
    #[inline]
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Whether the tree has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total number of nodes, branching and leaf.
    pub fn count(&self) -> usize {
        self.root().map_or(0, Node::count)
    }

    /// Number of leaves, i.e. distinct materialized entries.
    pub fn count_entries(&self) -> usize {
        self.root().map_or(0, Node::count_entries)
    }

    /// Every entry, depth-first with a node's children before its next
    /// sibling.
    pub fn iter(&self) -> Entries<'_> {
        Entries::new(self.root())
    }

    /// Indented view of the node graph, one line per node.
    pub fn structure(&self) -> Structure<'_> {
        Structure { root: self.root() }
    }

    /// Release every node.
    pub fn clear(&mut self) {
        self.root = None;
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Locate the node in which `query` runs out.
    ///
    /// The returned node's segment may extend past the end of `query`, so
    /// this answers "is `query` a prefix of some stored path". Fails when the
    /// query diverges inside a segment or runs past a leaf. An empty query
    /// never matches.
    pub fn find(&self, query: &[u8]) -> Option<&Node> {
        let mut query = query;
        let mut cur = self.root();
        while let Some(node) = cur {
            let k = common_prefix_len(query, &node.key);
            if k == 0 {
                cur = node.sibling();
            } else if k == query.len() {
                return Some(node);
            } else if k == node.key.len() {
                query = &query[k..];
                cur = node.child();
            } else {
                return None;
            }
        }
        None
    }

    /// Like [`find`](Self::find), but only accepts a node whose whole segment
    /// is the tail of `query`.
    ///
    /// Only the final segment boundary is checked; the path above it is not
    /// rebuilt.
    pub fn find_exact(&self, query: &[u8]) -> Option<&Node> {
        self.find(query).filter(|node| query.ends_with(node.key()))
    }

    /// Whether `key` ends on a segment boundary in the tree.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.find_exact(key).is_some()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert `key`.
    ///
    /// Returns `true` if a new leaf was created. Inserting a key that is a
    /// prefix of an existing path is a no-op. An empty key is only accepted
    /// into an empty tree.
    pub fn insert(&mut self, key: &[u8]) -> bool {
        if key.is_empty() {
            if self.root.is_some() {
                return false;
            }
            self.root = Some(Box::new(Node::new(key)));
            return true;
        }
        insert_into(&mut self.root, key)
    }

    /// Remove `key` together with every entry that extends it.
    ///
    /// Returns the number of leaves deleted with the unlinked subtree; `0`
    /// means nothing was unlinked. Removing a missing key never fails.
    ///
    /// This is not always the net change in [`count_entries`](Self::count_entries):
    /// a node left without children is a leaf again, so with `ab` and then
    /// `abc` inserted, removing `abc` deletes one leaf and `ab` becomes an
    /// entry.
    ///
    /// An empty key ends inside the first node of the top-level chain, so
    /// `remove(b"")` drops that node and everything under it.
    pub fn remove(&mut self, key: &[u8]) -> usize {
        remove_from(&mut self.root, key)
    }
}

fn insert_into(slot: &mut Option<Box<Node>>, key: &[u8]) -> bool {
    match slot {
        None => {
            *slot = Some(Box::new(Node::new(key)));
            true
        }
        Some(node) => {
            let k = common_prefix_len(key, &node.key);
            if k == 0 {
                insert_into(&mut node.sibling, key)
            } else if k < key.len() {
                if k < node.key.len() {
                    node.split(k);
                }
                insert_into(&mut node.child, &key[k..])
            } else {
                false
            }
        }
    }
}

fn remove_from(slot: &mut Option<Box<Node>>, key: &[u8]) -> usize {
    let Some(node) = slot.as_deref_mut() else {
        return 0;
    };

    let k = common_prefix_len(key, &node.key);
    if k == key.len() {
        let removed = node.own_entries();
        let next = node.sibling.take();
        *slot = next;
        trace!(removed, "removed subtree");
        removed
    } else if k == 0 {
        remove_from(&mut node.sibling, key)
    } else if k == node.key.len() {
        let removed = remove_from(&mut node.child, &key[k..]);
        node.join();
        removed
    } else {
        0
    }
}

impl fmt::Debug for RadixTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|k| String::from_utf8_lossy(&k).into_owned()))
            .finish()
    }
}

impl<K: AsRef<[u8]>> Extend<K> for RadixTree {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key.as_ref());
        }
    }
}

impl<K: AsRef<[u8]>> FromIterator<K> for RadixTree {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a> IntoIterator for &'a RadixTree {
    type Item = Vec<u8>;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
