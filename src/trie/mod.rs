//! Y-fast trie: buckets, representative index and the per-dimension map.

mod bucket;
mod iter;
mod leaf;
mod node;
mod representative;
mod yfast;

pub use bucket::Bucket;
pub use iter::Iter;
pub use leaf::Representative;
pub use node::TrieNode;
pub use representative::RepresentativeIndex;
pub use yfast::YFastTrie;
