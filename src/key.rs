//! Trait for trie key types (u8, u16, u32, u64).

use core::fmt::Debug;
use core::hash::Hash;

/// Trait for unsigned integer keys used in the trie.
///
/// The implementing type fixes the universe width `W` of a dimension, which in
/// turn fixes the depth of the representative trie and the bucket size bounds.
/// Selecting the type replaces any runtime width marker: `RangeTree<E, u8>` is
/// an index over 8-bit universes.
pub trait TrieKey: Copy + Ord + Hash + Debug + Sized {
    /// Universe width in bits (trie depth).
    const BITS: u32;

    /// Top `len` bits of the key, right-aligned.
    ///
    /// Identifies the trie node at level `len` on this key's path.
    /// `prefix(0)` is the root prefix (always zero), `prefix(BITS)` is the key.
    ///
    /// # Performance
    /// O(1) - single shift in native register size
    fn prefix(self, len: u32) -> Self;

    /// Bit at given depth, counting from the most significant bit.
    ///
    /// # Arguments
    /// * `depth` - Bit index (0 = most significant)
    ///
    /// # Returns
    /// `0` or `1`; the branch taken below the node at level `depth`
    fn bit_at(self, depth: u32) -> u8;

    /// Narrow a u64 into this key type.
    ///
    /// # Returns
    /// `None` if `value` does not fit in `BITS` bits. Callers must report this;
    /// masking would break key ordering.
    fn from_u64(value: u64) -> Option<Self>;
}

macro_rules! impl_trie_key {
    ($($ty:ty),*) => {
        $(
            impl TrieKey for $ty {
                const BITS: u32 = <$ty>::BITS;

                #[inline(always)]
                fn prefix(self, len: u32) -> Self {
                    debug_assert!(len <= Self::BITS, "prefix length out of bounds");
                    if len == 0 {
                        0
                    } else {
                        self >> (Self::BITS - len)
                    }
                }

                #[inline(always)]
                fn bit_at(self, depth: u32) -> u8 {
                    debug_assert!(depth < Self::BITS, "depth out of bounds");
                    ((self >> (Self::BITS - 1 - depth)) & 1) as u8
                }

                #[inline(always)]
                fn from_u64(value: u64) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_trie_key!(u8, u16, u32, u64);
