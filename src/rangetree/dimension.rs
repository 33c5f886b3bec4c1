//! One level of the range tree: a y-fast trie over a single dimension.

use alloc::vec::Vec;

use crate::key::TrieKey;
use crate::trie::YFastTrie;

/// A y-fast trie over one dimension's keys.
///
/// The variant is fixed by depth when the level is created: the last
/// dimension stores entries, every earlier one stores the nested level for
/// the remaining dimensions. No runtime inspection of values is needed, and
/// recursion depth equals the tree's dimension count.
#[derive(Debug, Clone)]
pub(crate) enum Dimension<E, K: TrieKey> {
    /// Last dimension: key -> entry
    Leaf(YFastTrie<K, E>),

    /// Earlier dimension: key -> nested level over the remaining dimensions
    Branch(YFastTrie<K, Dimension<E, K>>),
}

impl<E, K: TrieKey> Dimension<E, K> {
    /// Create an empty level covering `remaining` dimensions (>= 1).
    pub fn new(remaining: usize) -> Self {
        debug_assert!(remaining >= 1);
        if remaining == 1 {
            Dimension::Leaf(YFastTrie::new())
        } else {
            Dimension::Branch(YFastTrie::new())
        }
    }

    /// Check if no entry is stored below this level.
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            Dimension::Leaf(trie) => trie.is_empty(),
            Dimension::Branch(trie) => trie.is_empty(),
        }
    }

    /// Insert or overwrite the entry at `keys`.
    ///
    /// Missing nested levels are created on the way down.
    ///
    /// # Returns
    /// The entry previously stored at `keys`, or `None`
    pub fn insert(&mut self, keys: &[K], entry: E) -> Option<E> {
        match self {
            Dimension::Leaf(trie) => {
                debug_assert_eq!(keys.len(), 1);
                trie.insert(keys[0], entry)
            }
            Dimension::Branch(trie) => {
                let remaining = keys.len() - 1;
                let nested = trie.get_or_insert_with(keys[0], || {
                    log::debug!("new dimension branch at {:?}", keys[0]);
                    Dimension::new(remaining)
                });
                nested.insert(&keys[1..], entry)
            }
        }
    }

    /// Exact lookup of the entry at `keys`.
    ///
    /// Never creates levels; a missing branch anywhere yields `None`.
    pub fn get(&self, keys: &[K]) -> Option<&E> {
        match self {
            Dimension::Leaf(trie) => trie.get(keys[0]),
            Dimension::Branch(trie) => trie.get(keys[0])?.get(&keys[1..]),
        }
    }

    /// Remove the entry at `keys`.
    ///
    /// Nested levels left empty are pruned.
    pub fn remove(&mut self, keys: &[K]) -> Option<E> {
        match self {
            Dimension::Leaf(trie) => trie.remove(keys[0]),
            Dimension::Branch(trie) => {
                let nested = trie.get_mut(keys[0])?;
                let removed = nested.remove(&keys[1..]);
                if removed.is_some() && nested.is_empty() {
                    trie.remove(keys[0]);
                    log::debug!("pruned empty dimension branch at {:?}", keys[0]);
                }
                removed
            }
        }
    }

    /// Collect entries whose keys lie within `[low, high]` in every remaining
    /// dimension, in lexicographic key order.
    pub fn query<'a>(&'a self, low: &[K], high: &[K], out: &mut Vec<&'a E>) {
        match self {
            Dimension::Leaf(trie) => {
                out.extend(trie.range(low[0]..=high[0]).map(|(_, entry)| entry));
            }
            Dimension::Branch(trie) => {
                for (_, nested) in trie.range(low[0]..=high[0]) {
                    nested.query(&low[1..], &high[1..], out);
                }
            }
        }
    }

    /// Number of entries stored below this level.
    pub fn count(&self) -> usize {
        match self {
            Dimension::Leaf(trie) => trie.len(),
            Dimension::Branch(trie) => trie.iter().map(|(_, nested)| nested.count()).sum(),
        }
    }

    /// Panic if any trie below is malformed, a branch is empty, or the depth
    /// disagrees with `remaining`.
    pub fn check_invariants(&self, remaining: usize) {
        match self {
            Dimension::Leaf(trie) => {
                assert_eq!(remaining, 1, "entry level above the last dimension");
                trie.check_invariants();
            }
            Dimension::Branch(trie) => {
                assert!(remaining > 1, "branch level at the last dimension");
                trie.check_invariants();
                for (key, nested) in trie.iter() {
                    assert!(!nested.is_empty(), "empty branch left at {key:?}");
                    nested.check_invariants(remaining - 1);
                }
            }
        }
    }
}
