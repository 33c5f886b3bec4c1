//! Internal node structure for the binary representative trie.

use crate::constants::EMPTY;

/// Internal node of the representative trie.
///
/// A node at level `l` stands for every representative sharing its top `l`
/// bits. It exists exactly when at least one such representative exists.
///
/// # Layout
/// - `children`: 8 bytes - node (or representative, at the last level) index
///   for bit 0 and bit 1, `EMPTY` if absent
/// - `min_leaf` / `max_leaf`: 8 bytes - smallest and largest representative
///   below this node
///
/// # Descent
/// When a search key's path ends at this node (its child in the key's
/// direction is missing), the other child's subtree lies entirely on one side
/// of the key, so `min_leaf` / `max_leaf` give its neighbor in O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieNode {
    /// Child indices for bit 0 and bit 1.
    ///
    /// Level `W - 1` children are representative indices; all others are node
    /// indices.
    pub children: [u32; 2],

    /// Representative with the smallest key below this node.
    pub min_leaf: u32,

    /// Representative with the largest key below this node.
    pub max_leaf: u32,
}

impl TrieNode {
    /// Create a node covering a single representative.
    ///
    /// Children start `EMPTY`; the caller links the child on the
    /// representative's path.
    #[inline(always)]
    pub fn new(leaf: u32) -> Self {
        TrieNode {
            children: [EMPTY; 2],
            min_leaf: leaf,
            max_leaf: leaf,
        }
    }

    /// Check if child exists for given bit.
    #[inline(always)]
    pub fn has_child(&self, bit: u8) -> bool {
        self.children[bit as usize] != EMPTY
    }

    /// Get child index for given bit, or `EMPTY`.
    #[inline(always)]
    pub fn get_child(&self, bit: u8) -> u32 {
        self.children[bit as usize]
    }

    /// Set child for given bit.
    #[inline(always)]
    pub fn set_child(&mut self, bit: u8, child_idx: u32) {
        self.children[bit as usize] = child_idx;
    }

    /// Clear child for given bit.
    #[inline]
    pub fn clear_child(&mut self, bit: u8) {
        self.children[bit as usize] = EMPTY;
    }

    /// Check if node has no children.
    ///
    /// An empty node no longer covers any representative and must be dropped.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.children == [EMPTY; 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node() {
        let node = TrieNode::new(7);

        assert!(node.is_empty());
        assert!(!node.has_child(0));
        assert!(!node.has_child(1));
        assert_eq!(node.min_leaf, 7);
        assert_eq!(node.max_leaf, 7);
    }

    #[test]
    fn test_set_and_clear_child() {
        let mut node = TrieNode::new(0);

        node.set_child(1, 42);
        assert!(node.has_child(1));
        assert!(!node.has_child(0));
        assert_eq!(node.get_child(1), 42);
        assert!(!node.is_empty());

        node.set_child(0, 10);
        node.clear_child(1);
        assert_eq!(node.get_child(1), EMPTY);
        assert_eq!(node.get_child(0), 10);
        assert!(!node.is_empty());

        node.clear_child(0);
        assert!(node.is_empty());
    }
}
