//! Basic usage example for yfast-rangetree.
//!
//! Walks through the single-dimension trie and the multi-dimensional tree.

use yfast_rangetree::{Entry, RangeTree, YFastTrie};

/// A sensor reading keyed by (station, minute)
#[derive(Debug, Clone, PartialEq)]
struct Reading {
    station: u64,
    minute: u64,
    celsius: f32,
}

impl Entry for Reading {
    fn dimensions(&self) -> usize {
        2
    }

    fn value_at_dimension(&self, dimension: usize) -> u64 {
        match dimension {
            0 => self.station,
            _ => self.minute,
        }
    }
}

fn main() {
    println!("=== yfast-rangetree - Basic Usage Example ===\n");

    // Single dimension: an ordered map over 64-bit keys
    let mut trie = YFastTrie::<u64, &str>::new();
    println!("Inserting keys: 100, 200, 150, 300");
    trie.insert(100, "hundred");
    trie.insert(200, "two hundred");
    trie.insert(150, "one fifty");
    trie.insert(300, "three hundred");
    println!("Trie now contains {} keys", trie.len());

    println!("\nLookups:");
    println!("  get(150): {:?}", trie.get(150));
    println!("  get(999): {:?}", trie.get(999));
    println!("  insert(150) again returns: {:?}", trie.insert(150, "150"));

    println!("\nMin/Max:");
    println!("  min: {:?}", trie.min());
    println!("  max: {:?}", trie.max());

    println!("\nNavigation:");
    println!("  successor(100): {:?}", trie.successor(100));
    println!("  successor(175): {:?}", trie.successor(175));
    println!("  predecessor(200): {:?}", trie.predecessor(200));
    println!("  predecessor(175): {:?}", trie.predecessor(175));

    println!("\nRange queries:");
    let keys: Vec<u64> = trie.range(100..200).map(|(k, _)| k).collect();
    println!("  range(100..200): {:?}", keys);
    let keys: Vec<u64> = trie.range(100..=200).map(|(k, _)| k).collect();
    println!("  range(100..=200): {:?}", keys);

    println!("\nRemoving key 150:");
    println!("  remove(150): {:?}", trie.remove(150));
    println!("  len: {}", trie.len());

    // Clustered keys fill buckets and split them
    let mut clustered = YFastTrie::<u64, ()>::new();
    for i in (1000..1100).chain(2000..2100) {
        clustered.insert(i, ());
    }
    println!("\nClustered trie:");
    println!("  keys: {}", clustered.len());
    println!("  buckets: {}", clustered.bucket_count());
    let gap: Vec<u64> = clustered.range(1095..2005).map(|(k, _)| k).collect();
    println!("  range(1095..2005) has {} keys", gap.len());

    // Two dimensions: (station, minute) -> reading
    println!("\n=== Range Tree ===\n");
    let mut readings = match RangeTree::<Reading, u32>::new(2) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("failed to create tree: {err}");
            return;
        }
    };

    let batch = vec![
        Reading { station: 7, minute: 10, celsius: 21.5 },
        Reading { station: 7, minute: 11, celsius: 21.7 },
        Reading { station: 9, minute: 10, celsius: 18.2 },
    ];
    match readings.add(batch) {
        Ok(overwritten) => println!("add -> {:?}", overwritten),
        Err(err) => eprintln!("add failed: {err}"),
    }

    let corrected = Reading { station: 7, minute: 11, celsius: 21.9 };
    println!("overwrite -> {:?}", readings.add([corrected]));

    println!("get((7, 11), (9, 11)) -> {:?}", readings.get(&[[7u64, 11], [9, 11]]));
    println!("box [7..=9] x [10..=10] -> {:?}", readings.query(&[7, 10], &[9, 10]));

    // Keys must fit the configured width
    println!("get((1 << 40, 0)) -> {:?}", readings.get(&[[1u64 << 40, 0]]));

    println!("\n=== Example Complete ===");
}
