use crate::node::Node;

/// Lazy depth-first enumeration of entries.
///
/// Yields the concatenated segments from the starting node down to every
/// leaf. A node's child list is visited before its next sibling.
pub struct Entries<'a> {
    /// Pending nodes with the path length their segment starts at.
    stack: Vec<(&'a Node, usize)>,
    path: Vec<u8>,
}

impl<'a> Entries<'a> {
    pub(crate) fn new(start: Option<&'a Node>) -> Self {
        let mut stack = Vec::new();
        if let Some(node) = start {
            stack.push((node, 0));
        }
        Self {
            stack,
            path: Vec::new(),
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, base)) = self.stack.pop() {
            self.path.truncate(base);
            self.path.extend_from_slice(node.key());

            if let Some(sibling) = node.sibling() {
                self.stack.push((sibling, base));
            }
            match node.child() {
                Some(child) => self.stack.push((child, self.path.len())),
                None => return Some(self.path.clone()),
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Entries<'_> {}
