use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, u32),
    Remove(u8),
    Get(u8),
    Predecessor(u8),
    Successor(u8),
    Range(u8, u8),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        45 => (any::<u8>(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        25 => any::<u8>().prop_map(Op::Remove),
        10 => any::<u8>().prop_map(Op::Get),
        8 => any::<u8>().prop_map(Op::Predecessor),
        8 => any::<u8>().prop_map(Op::Successor),
        4 => (any::<u8>(), any::<u8>()).prop_map(|(lo, hi)| Op::Range(lo, hi)),
    ];
    prop::collection::vec(op, 0..=1000)
}

/// Keys clustered into a few narrow runs of a 16-bit universe, so buckets
/// fill, split and merge instead of staying singletons.
fn clustered_key() -> impl Strategy<Value = u16> {
    (0u16..4, 0u16..64).prop_map(|(run, offset)| run * 16_000 + offset)
}

#[derive(Clone, Debug, PartialEq)]
struct Point {
    keys: [u64; 2],
    tag: u32,
}

impl Entry for Point {
    fn dimensions(&self) -> usize {
        2
    }

    fn value_at_dimension(&self, dimension: usize) -> u64 {
        self.keys[dimension]
    }
}

#[derive(Clone, Debug)]
enum TreeOp {
    Add(Vec<(u8, u8, u32)>),
    Get(Vec<(u8, u8)>),
    Remove(Vec<(u8, u8)>),
    Query((u8, u8), (u8, u8)),
}

fn small_pair() -> impl Strategy<Value = (u8, u8)> {
    (0u8..24, 0u8..24)
}

fn tree_ops_strategy() -> impl Strategy<Value = Vec<TreeOp>> {
    let op = prop_oneof![
        45 => prop::collection::vec((0u8..24, 0u8..24, any::<u32>()), 1..8).prop_map(TreeOp::Add),
        20 => prop::collection::vec(small_pair(), 1..8).prop_map(TreeOp::Get),
        25 => prop::collection::vec(small_pair(), 1..8).prop_map(TreeOp::Remove),
        10 => (small_pair(), small_pair()).prop_map(|(lo, hi)| TreeOp::Query(lo, hi)),
    ];
    prop::collection::vec(op, 0..=300)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_yfast_equivalence(ops in ops_strategy()) {
        let mut t: YFastTrie<u8, u32> = YFastTrie::new();
        let mut m: BTreeMap<u8, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(t.insert(key, value), m.insert(key, value));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(t.remove(key), m.remove(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(key), m.get(&key));
                }
                Op::Predecessor(key) => {
                    let expected = m.range(..key).next_back().map(|(k, v)| (*k, v));
                    prop_assert_eq!(t.predecessor(key), expected);
                }
                Op::Successor(key) => {
                    let expected = m
                        .range((std::ops::Bound::Excluded(key), std::ops::Bound::Unbounded))
                        .next()
                        .map(|(k, v)| (*k, v));
                    prop_assert_eq!(t.successor(key), expected);
                }
                Op::Range(lo, hi) => {
                    let got: Vec<(u8, u32)> = t.range(lo..=hi).map(|(k, v)| (k, *v)).collect();
                    let expected: Vec<(u8, u32)> = if lo <= hi {
                        m.range(lo..=hi).map(|(k, v)| (*k, *v)).collect()
                    } else {
                        Vec::new()
                    };
                    prop_assert_eq!(got, expected);
                }
            }

            t.check_invariants();
            prop_assert_eq!(t.len(), m.len());
        }

        prop_assert_eq!(t.min(), m.iter().next().map(|(k, v)| (*k, v)));
        prop_assert_eq!(t.max(), m.iter().next_back().map(|(k, v)| (*k, v)));

        let got: Vec<(u8, u32)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(u8, u32)> = m.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_yfast_clustered_u16(
        inserts in prop::collection::vec(clustered_key(), 0..=600),
        removes in prop::collection::vec(clustered_key(), 0..=600),
    ) {
        let mut t: YFastTrie<u16, ()> = YFastTrie::new();
        let mut m: BTreeMap<u16, ()> = BTreeMap::new();

        for key in inserts {
            prop_assert_eq!(t.insert(key, ()), m.insert(key, ()));
        }
        t.check_invariants();

        for key in removes {
            prop_assert_eq!(t.remove(key), m.remove(&key));
            t.check_invariants();
        }

        let got: Vec<u16> = t.iter().map(|(k, _)| k).collect();
        let expected: Vec<u16> = m.keys().copied().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_rangetree_equivalence(ops in tree_ops_strategy()) {
        let mut t: RangeTree<Point, u8> = RangeTree::new(2).unwrap();
        let mut m: BTreeMap<(u8, u8), u32> = BTreeMap::new();

        let point = |(x, y): (u8, u8), tag: u32| Point {
            keys: [u64::from(x), u64::from(y)],
            tag,
        };

        for op in ops {
            match op {
                TreeOp::Add(batch) => {
                    let entries: Vec<Point> = batch.iter().map(|&(x, y, tag)| point((x, y), tag)).collect();
                    let got = t.add(entries).unwrap();
                    let expected: Vec<Option<Point>> = batch
                        .iter()
                        .map(|&(x, y, tag)| m.insert((x, y), tag).map(|old| point((x, y), old)))
                        .collect();
                    prop_assert_eq!(got, expected);
                }
                TreeOp::Get(batch) => {
                    let queries: Vec<[u64; 2]> = batch.iter().map(|&(x, y)| [u64::from(x), u64::from(y)]).collect();
                    let got: Vec<Option<u32>> = t
                        .get(&queries)
                        .unwrap()
                        .into_iter()
                        .map(|slot| slot.map(|p| p.tag))
                        .collect();
                    let expected: Vec<Option<u32>> = batch.iter().map(|pair| m.get(pair).copied()).collect();
                    prop_assert_eq!(got, expected);
                }
                TreeOp::Remove(batch) => {
                    let queries: Vec<[u64; 2]> = batch.iter().map(|&(x, y)| [u64::from(x), u64::from(y)]).collect();
                    let got: Vec<Option<u32>> = t
                        .remove(&queries)
                        .unwrap()
                        .into_iter()
                        .map(|slot| slot.map(|p| p.tag))
                        .collect();
                    let expected: Vec<Option<u32>> = batch.iter().map(|pair| m.remove(pair)).collect();
                    prop_assert_eq!(got, expected);
                }
                TreeOp::Query((lx, ly), (hx, hy)) => {
                    let got: Vec<(u8, u8, u32)> = t
                        .query(&[u64::from(lx), u64::from(ly)], &[u64::from(hx), u64::from(hy)])
                        .unwrap()
                        .into_iter()
                        .map(|p| (p.keys[0] as u8, p.keys[1] as u8, p.tag))
                        .collect();
                    let expected: Vec<(u8, u8, u32)> = m
                        .iter()
                        .filter(|((x, y), _)| (lx..=hx).contains(x) && (ly..=hy).contains(y))
                        .map(|(&(x, y), &tag)| (x, y, tag))
                        .collect();
                    prop_assert_eq!(got, expected);
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        t.check_invariants();
    }
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys: [u8; 6] = [0, 1, 2, 200, 201, 255];

    // Remove every key of a multi-bucket trie in several orders
    let mut base: YFastTrie<u8, u8> = YFastTrie::new();
    for key in 0..=40u8 {
        base.insert(key, key);
    }
    for &key in &keys {
        base.insert(key, key);
    }
    base.check_invariants();

    for start in 0..keys.len() {
        for reverse in [false, true] {
            let mut t = base.clone();
            let mut m: BTreeMap<u8, u8> = t.iter().map(|(k, v)| (k, *v)).collect();

            let mut order: Vec<u8> = keys.iter().cycle().skip(start).take(keys.len()).copied().collect();
            order.extend(0..=40u8);
            if reverse {
                order.reverse();
            }

            for key in order {
                assert_eq!(t.remove(key), m.remove(&key));
                assert_eq!(t.len(), m.len());
                t.check_invariants();
            }
            assert!(t.is_empty());
            assert_eq!(t.bucket_count(), 0);
        }
    }
}
