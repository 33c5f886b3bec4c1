//! Multi-dimensional composition of y-fast tries.

mod dimension;
mod entry;
mod tree;

pub use entry::{Entries, Entry};
pub use tree::RangeTree;
