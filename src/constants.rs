//! Core constants and bucket sizing for yfast-rangetree.

/// Sentinel value for empty/null arena index.
///
/// Used to indicate:
/// - Empty child slot in `TrieNode.children`
/// - End of the representative linked list (`prev`/`next`)
/// - Empty first/last representative in `RepresentativeIndex`
pub const EMPTY: u32 = u32::MAX;

/// Largest number of keys a bucket may hold before it is split.
///
/// A y-fast trie keeps Θ(W) keys per bucket so that the number of buckets
/// is O(n / W) and the in-bucket search is O(log W).
///
/// # Arguments
/// * `bits` - Universe width `W`
#[inline(always)]
pub const fn bucket_max(bits: u32) -> usize {
    2 * bits as usize
}

/// Smallest number of keys a bucket may hold while it has a neighbor.
///
/// A lone bucket is allowed to shrink below this; it has nothing to merge with.
///
/// # Arguments
/// * `bits` - Universe width `W`
#[inline(always)]
pub const fn bucket_min(bits: u32) -> usize {
    (bits / 2) as usize
}
