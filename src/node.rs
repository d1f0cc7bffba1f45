//! Tree nodes in first-child/next-sibling form.
//!
//! Every node owns one segment of bytes plus two optional links:
//!
//! - `child`: the list of segments that continue the path through this node
//! - `sibling`: the next alternative at the same position
//!
//! Siblings never share a leading byte, so at most one node in a sibling
//! chain can match the next byte of a query.

use std::fmt;

use smallvec::SmallVec;
use tracing::trace;

use crate::iter::Entries;

/// Inline capacity for segment bytes before spilling to the heap.
pub(crate) const INLINE_SEGMENT: usize = 16;

/// Bytes stored in a single node.
pub(crate) type Segment = SmallVec<[u8; INLINE_SEGMENT]>;

// =============================================================================
// Prefix computation
// =============================================================================

/// Length of the common prefix of `query` and `segment`.
///
/// The scan is bounded by `query.len()` and stops early once `segment` is
/// exhausted, so the result is always in `0..=query.len()`. A segment longer
/// than the query may be only partially consumed.
#[inline]
pub fn common_prefix_len(query: &[u8], segment: &[u8]) -> usize {
    query
        .iter()
        .zip(segment)
        .take_while(|(a, b)| a == b)
        .count()
}

// =============================================================================
// Node
// =============================================================================

/// A single node of a [`RadixTree`](crate::RadixTree).
///
/// Nodes are only ever reached by reference through the tree; the tree owns
/// all of them.
#[derive(Clone)]
pub struct Node {
    pub(crate) key: Segment,
    pub(crate) child: Option<Box<Node>>,
    pub(crate) sibling: Option<Box<Node>>,
}

impl Node {
    /// Create a detached node holding a copy of `key`.
    pub(crate) fn new(key: &[u8]) -> Self {
        Self {
            key: Segment::from_slice(key),
            child: None,
            sibling: None,
        }
    }

    /// The segment this node contributes to every path through it.
    #[inline]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// First node of the list continuing this node's path.
    #[inline]
    pub fn child(&self) -> Option<&Node> {
        self.child.as_deref()
    }

    /// Next alternative at this node's position.
    #[inline]
    pub fn sibling(&self) -> Option<&Node> {
        self.sibling.as_deref()
    }

    /// A leaf ends exactly one entry.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.child.is_none()
    }

    /// Number of nodes reachable from here, this node and its following
    /// siblings included.
    pub fn count(&self) -> usize {
        let mut stack: Vec<&Node> = vec![self];
        let mut n = 0;
        while let Some(node) = stack.pop() {
            n += 1;
            stack.extend(node.child());
            stack.extend(node.sibling());
        }
        n
    }

    /// Number of leaves reachable from here, this node and its following
    /// siblings included.
    pub fn count_entries(&self) -> usize {
        let mut stack: Vec<&Node> = vec![self];
        let mut n = 0;
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                n += 1;
            }
            stack.extend(node.child());
            stack.extend(node.sibling());
        }
        n
    }

    /// Entries ending under this node, excluding its siblings.
    pub(crate) fn own_entries(&self) -> usize {
        self.child().map_or(1, Node::count_entries)
    }

    /// Every entry reachable from this node, as byte strings relative to the
    /// start of this node's segment.
    pub fn entries(&self) -> Entries<'_> {
        Entries::new(Some(self))
    }

    /// Indented view of the nodes reachable from here.
    pub fn structure(&self) -> Structure<'_> {
        Structure { root: Some(self) }
    }

    // =========================================================================
    // Structural operations
    // =========================================================================

    /// Introduce a branch point `k` bytes into this node's segment.
    ///
    /// The tail moves into a new child which inherits the old child list.
    /// The key set represented by the tree is unchanged.
    pub(crate) fn split(&mut self, k: usize) {
        debug_assert!(0 < k && k < self.key.len(), "split offset out of range");

        // Allocate before touching `self` so a failed allocation leaves the
        // node intact.
        let mut tail = Box::new(Node::new(&self.key[k..]));
        tail.child = self.child.take();
        self.key.truncate(k);
        self.child = Some(tail);

        trace!(at = k, head_len = self.key.len(), "split");
    }

    /// Merge the only child into this node.
    ///
    /// Returns `false` and leaves the node untouched when there is no child or
    /// the child has siblings.
    pub(crate) fn join(&mut self) -> bool {
        let extra = match self.child() {
            Some(child) if child.sibling.is_none() => child.key.len(),
            _ => return false,
        };
        self.key.reserve(extra);

        let Some(mut child) = self.child.take() else {
            return false;
        };
        self.key.extend_from_slice(&child.key);
        self.child = child.child.take();

        trace!(merged = extra, key_len = self.key.len(), "join");
        true
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &String::from_utf8_lossy(&self.key))
            .field("child", &self.child)
            .field("sibling", &self.sibling)
            .finish()
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // Unlink iteratively; every node popped here has no links left by the
        // time it is dropped, so this never recurses.
        let mut stack: Vec<Box<Node>> = Vec::new();
        stack.extend(self.child.take());
        stack.extend(self.sibling.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.child.take());
            stack.extend(node.sibling.take());
        }
    }
}

// =============================================================================
// Structure dump
// =============================================================================

/// `Display` adapter printing one line per node.
///
/// Each line is `"{dashes}> {segment}"`, with one dash per child edge between
/// the starting node and the printed node. Siblings share their depth.
pub struct Structure<'a> {
    pub(crate) root: Option<&'a Node>,
}

impl fmt::Display for Structure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 0));
        }
        while let Some((node, depth)) = stack.pop() {
            for _ in 0..depth {
                f.write_str("-")?;
            }
            writeln!(f, "> {}", String::from_utf8_lossy(&node.key))?;

            if let Some(sibling) = node.sibling() {
                stack.push((sibling, depth));
            }
            if let Some(child) = node.child() {
                stack.push((child, depth + 1));
            }
        }
        Ok(())
    }
}
