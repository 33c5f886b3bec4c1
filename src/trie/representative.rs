//! Representative index: an x-fast trie over bucket representatives.

use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::arena::{Arena, BucketHandle};
use crate::constants::EMPTY;
use crate::key::TrieKey;
use crate::trie::{Representative, TrieNode};

/// Binary trie over the bit patterns of bucket representatives.
///
/// Every level `l` (0..W) keeps a hash table from `l`-bit prefix to trie node,
/// and level `W` maps full keys to representatives. Because the set of
/// existing prefixes of a key is closed downward, the deepest existing node on
/// a key's path is found by binary search over levels: O(log W) hash lookups
/// instead of a W-step walk.
///
/// Representatives are also kept in an ascending doubly-linked list so that
/// once the deepest node is found, the predecessor representative is O(1)
/// away.
///
/// # Architecture
/// - `nodes`: arena of internal `TrieNode`s (levels 0..W)
/// - `leaves`: arena of `Representative`s, one per live bucket
/// - `levels[l]`: prefix -> node index for level `l`
/// - `leaf_map`: key -> representative index (level W)
///
/// # Performance
/// - Lookup (`predecessor_or_equal`, `find_bucket_for`): O(log W)
/// - Register / unregister: O(W) (one node per level)
#[derive(Debug, Clone)]
pub struct RepresentativeIndex<K: TrieKey> {
    /// Internal trie nodes
    nodes: Arena<TrieNode>,

    /// Representatives, one per bucket
    leaves: Arena<Representative<K>>,

    /// Per-level prefix tables (levels 0..W)
    levels: Vec<HashMap<K, u32>>,

    /// Full-key table (level W)
    leaf_map: HashMap<K, u32>,

    /// Representative with the smallest key (EMPTY if none)
    first_leaf: u32,

    /// Representative with the largest key (EMPTY if none)
    last_leaf: u32,
}

impl<K: TrieKey> RepresentativeIndex<K> {
    /// Create an empty index for a `K::BITS`-wide universe.
    pub fn new() -> Self {
        let mut levels = Vec::with_capacity(K::BITS as usize);
        levels.resize_with(K::BITS as usize, HashMap::new);

        Self {
            nodes: Arena::new(),
            leaves: Arena::new(),
            levels,
            leaf_map: HashMap::new(),
            first_leaf: EMPTY,
            last_leaf: EMPTY,
        }
    }

    /// Number of registered representatives (live buckets).
    #[inline]
    pub fn len(&self) -> usize {
        self.leaf_map.len()
    }

    /// Check if no representative is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.leaf_map.is_empty()
    }

    /// Representative by index.
    #[inline(always)]
    pub fn leaf(&self, leaf_idx: u32) -> &Representative<K> {
        self.leaves.get(leaf_idx)
    }

    /// Smallest representative.
    #[inline]
    pub fn first_leaf(&self) -> Option<u32> {
        link(self.first_leaf)
    }

    /// Largest representative.
    #[inline]
    pub fn last_leaf(&self) -> Option<u32> {
        link(self.last_leaf)
    }

    /// Next representative in ascending order.
    #[inline]
    pub fn next_leaf(&self, leaf_idx: u32) -> Option<u32> {
        link(self.leaves.get(leaf_idx).next)
    }

    /// Previous representative in ascending order.
    #[inline]
    pub fn prev_leaf(&self, leaf_idx: u32) -> Option<u32> {
        link(self.leaves.get(leaf_idx).prev)
    }

    /// Representative registered exactly at `key`.
    #[inline]
    pub fn leaf_for_key(&self, key: K) -> Option<u32> {
        self.leaf_map.get(&key).copied()
    }

    /// Locate the bucket whose range covers `key`.
    ///
    /// That is the bucket of the largest representative `<= key`.
    ///
    /// # Returns
    /// `None` if the index is empty or `key` is below every representative
    #[inline]
    pub fn find_bucket_for(&self, key: K) -> Option<BucketHandle> {
        self.predecessor_or_equal(key)
            .map(|leaf_idx| self.leaves.get(leaf_idx).bucket)
    }

    /// Largest representative with key `<= key`.
    ///
    /// # Algorithm
    /// 1. Exact hit in the level-W table returns immediately
    /// 2. Binary search levels for the deepest node on `key`'s path
    /// 3. That node lacks the child in `key`'s direction, so its other subtree
    ///    lies entirely on one side of `key`:
    ///    - bit 1 missing: the subtree is below `key`, answer is its max
    ///    - bit 0 missing: the subtree is above `key`, answer is the list
    ///      predecessor of its min
    ///
    /// # Performance
    /// O(log W) hash lookups
    pub fn predecessor_or_equal(&self, key: K) -> Option<u32> {
        if self.is_empty() {
            return None;
        }
        if let Some(&leaf_idx) = self.leaf_map.get(&key) {
            return Some(leaf_idx);
        }

        let (level, node_idx) = self.deepest_node(key);
        let node = self.nodes.get(node_idx);

        if key.bit_at(level) == 1 {
            debug_assert!(node.has_child(0));
            Some(node.max_leaf)
        } else {
            debug_assert!(node.has_child(1));
            link(self.leaves.get(node.min_leaf).prev)
        }
    }

    /// Deepest existing trie node on `key`'s path, as `(level, node)`.
    ///
    /// Requires a non-empty index (so the root at level 0 exists) and `key`
    /// not being a representative itself.
    fn deepest_node(&self, key: K) -> (u32, u32) {
        // Invariant: level `low` exists, level `high` does not.
        let mut low = 0u32;
        let mut high = K::BITS;
        let mut node_idx = self.levels[0]
            .get(&key.prefix(0))
            .copied()
            .expect("root node exists in a non-empty index");

        while high - low > 1 {
            let mid = low + (high - low) / 2;
            match self.levels[mid as usize].get(&key.prefix(mid)) {
                Some(&idx) => {
                    low = mid;
                    node_idx = idx;
                }
                None => high = mid,
            }
        }

        (low, node_idx)
    }

    /// Register a new representative for `bucket`.
    ///
    /// Creates the missing trie nodes along `key`'s path, widens min/max of the
    /// existing ones and links the representative into the ascending list.
    ///
    /// # Returns
    /// Index of the new representative
    ///
    /// # Performance
    /// O(W) - touches one node per level
    pub fn register(&mut self, key: K, bucket: BucketHandle) -> u32 {
        debug_assert!(
            !self.leaf_map.contains_key(&key),
            "representative {key:?} registered twice"
        );

        let pred = self.predecessor_or_equal(key);
        let leaf_idx = self.leaves.alloc(Representative::new(key, bucket));
        self.link_leaf(leaf_idx, pred);

        let mut parent = EMPTY;
        for level in 0..K::BITS {
            let prefix = key.prefix(level);
            let node_idx = match self.levels[level as usize].get(&prefix).copied() {
                Some(node_idx) => {
                    let (min_key, max_key) = {
                        let node = self.nodes.get(node_idx);
                        (
                            self.leaves.get(node.min_leaf).key,
                            self.leaves.get(node.max_leaf).key,
                        )
                    };
                    let node = self.nodes.get_mut(node_idx);
                    if key < min_key {
                        node.min_leaf = leaf_idx;
                    }
                    if key > max_key {
                        node.max_leaf = leaf_idx;
                    }
                    node_idx
                }
                None => {
                    let node_idx = self.nodes.alloc(TrieNode::new(leaf_idx));
                    self.levels[level as usize].insert(prefix, node_idx);
                    if parent != EMPTY {
                        self.nodes
                            .get_mut(parent)
                            .set_child(key.bit_at(level - 1), node_idx);
                    }
                    node_idx
                }
            };
            parent = node_idx;
        }

        self.nodes
            .get_mut(parent)
            .set_child(key.bit_at(K::BITS - 1), leaf_idx);
        self.leaf_map.insert(key, leaf_idx);

        leaf_idx
    }

    /// Remove the representative registered at `key`.
    ///
    /// Drops trie nodes that no longer cover any representative and narrows
    /// min/max of the remaining ones using the list neighbors.
    ///
    /// # Returns
    /// The bucket the representative routed to, or `None` if `key` was not a
    /// representative
    ///
    /// # Performance
    /// O(W) - touches one node per level
    pub fn unregister(&mut self, key: K) -> Option<BucketHandle> {
        let leaf_idx = self.leaf_map.remove(&key)?;
        let (prev, next) = {
            let leaf = self.leaves.get(leaf_idx);
            (leaf.prev, leaf.next)
        };
        self.unlink_leaf(leaf_idx);

        // While `detach` holds, the child on key's path was just dropped.
        let mut detach = true;
        for level in (0..K::BITS).rev() {
            let prefix = key.prefix(level);
            let node_idx = self.levels[level as usize]
                .get(&prefix)
                .copied()
                .expect("every prefix of a representative has a node");
            let node = self.nodes.get_mut(node_idx);

            if detach {
                node.clear_child(key.bit_at(level));
                if node.is_empty() {
                    self.levels[level as usize].remove(&prefix);
                    self.nodes.free(node_idx);
                    continue;
                }
                detach = false;
            }

            // A surviving node still covers other representatives, so the
            // removed one's list neighbor on that side is inside the subtree.
            if node.min_leaf == leaf_idx {
                node.min_leaf = next;
            }
            if node.max_leaf == leaf_idx {
                node.max_leaf = prev;
            }
        }

        Some(self.leaves.free(leaf_idx).bucket)
    }

    /// Move a bucket's representative from `old_key` to `new_key`.
    ///
    /// Called when a bucket's minimum changes. `new_key` must keep the bucket
    /// between the same list neighbors.
    ///
    /// # Returns
    /// Index of the new representative
    pub fn rekey(&mut self, old_key: K, new_key: K) -> u32 {
        let bucket = self
            .unregister(old_key)
            .expect("rekeyed representative is registered");
        log::trace!("representative {old_key:?} -> {new_key:?}");
        self.register(new_key, bucket)
    }

    /// Insert leaf into linked list after `pred`.
    ///
    /// `pred` is the representative immediately below the new one, or `None`
    /// if the new one becomes the first.
    ///
    /// # Performance
    /// O(1) - direct pointer updates
    fn link_leaf(&mut self, leaf_idx: u32, pred: Option<u32>) {
        let next = match pred {
            Some(pred_idx) => self.leaves.get(pred_idx).next,
            None => self.first_leaf,
        };
        let prev = pred.unwrap_or(EMPTY);

        {
            let leaf = self.leaves.get_mut(leaf_idx);
            leaf.prev = prev;
            leaf.next = next;
        }

        if prev == EMPTY {
            self.first_leaf = leaf_idx;
        } else {
            self.leaves.get_mut(prev).next = leaf_idx;
        }

        if next == EMPTY {
            self.last_leaf = leaf_idx;
        } else {
            self.leaves.get_mut(next).prev = leaf_idx;
        }
    }

    /// Remove leaf from linked list.
    ///
    /// # Performance
    /// O(1) - direct pointer updates
    fn unlink_leaf(&mut self, leaf_idx: u32) {
        let (prev, next) = {
            let leaf = self.leaves.get(leaf_idx);
            (leaf.prev, leaf.next)
        };

        if prev == EMPTY {
            self.first_leaf = next;
        } else {
            self.leaves.get_mut(prev).next = next;
        }

        if next == EMPTY {
            self.last_leaf = prev;
        } else {
            self.leaves.get_mut(next).prev = prev;
        }
    }

    /// Panic if the trie, tables and list disagree.
    ///
    /// Checks that the list is strictly ascending and matches `leaf_map`, that
    /// every representative's full path exists with correct child links, and
    /// that every node's min/max are the extreme representatives under it.
    pub fn check_invariants(&self) {
        let mut count = 0usize;
        let mut prev = EMPTY;
        let mut cursor = self.first_leaf;
        while cursor != EMPTY {
            let leaf = self.leaves.get(cursor);
            assert_eq!(leaf.prev, prev, "broken prev link at {:?}", leaf.key);
            if prev != EMPTY {
                assert!(
                    self.leaves.get(prev).key < leaf.key,
                    "representatives out of order at {:?}",
                    leaf.key
                );
            }
            assert_eq!(self.leaf_map.get(&leaf.key), Some(&cursor));

            let mut expected_child = cursor;
            for level in (0..K::BITS).rev() {
                let node_idx = *self.levels[level as usize]
                    .get(&leaf.key.prefix(level))
                    .unwrap_or_else(|| panic!("missing level {level} node for {:?}", leaf.key));
                let node = self.nodes.get(node_idx);
                assert_eq!(node.get_child(leaf.key.bit_at(level)), expected_child);

                let min_key = self.leaves.get(node.min_leaf).key;
                let max_key = self.leaves.get(node.max_leaf).key;
                assert!(min_key <= leaf.key && leaf.key <= max_key);
                assert_eq!(min_key.prefix(level), leaf.key.prefix(level));
                assert_eq!(max_key.prefix(level), leaf.key.prefix(level));

                expected_child = node_idx;
            }

            count += 1;
            prev = cursor;
            cursor = leaf.next;
        }

        assert_eq!(self.last_leaf, prev, "stale last representative");
        assert_eq!(count, self.leaf_map.len(), "list and table disagree");
        assert_eq!(count, self.leaves.len(), "leaked representatives");

        let node_count: usize = self.levels.iter().map(HashMap::len).sum();
        assert_eq!(node_count, self.nodes.len(), "leaked trie nodes");
    }
}

impl<K: TrieKey> Default for RepresentativeIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Map the `EMPTY` sentinel to `None`.
#[inline(always)]
fn link(idx: u32) -> Option<u32> {
    if idx == EMPTY {
        None
    } else {
        Some(idx)
    }
}
