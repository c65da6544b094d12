use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::rc::Rc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use splay_tree::SplayTree;

#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    Erase(i16),
    Access(i16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-40i16..40).prop_map(Op::Insert),
        2 => (-40i16..40).prop_map(Op::Erase),
        2 => (-40i16..40).prop_map(Op::Access),
    ]
}

fn model_remove(model: &mut Vec<i16>, key: i16) -> bool {
    match model.binary_search(&key) {
        Ok(pos) => {
            model.remove(pos);
            true
        }
        Err(_) => false,
    }
}

fn keys_of(tree: &SplayTree<i16>) -> Vec<i16> {
    tree.keys().into_iter().copied().collect()
}

proptest! {
    #[test]
    fn tree_matches_sorted_multiset(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut tree = SplayTree::new();
        let mut model: Vec<i16> = Vec::new();
        for op in ops {
            match op {
                Op::Insert(k) => {
                    let id = tree.insert(k);
                    prop_assert_eq!(tree.get_root(), Some(id));
                    let pos = model.partition_point(|x| *x <= k);
                    model.insert(pos, k);
                }
                Op::Erase(k) => {
                    let removed = tree.erase(&k);
                    prop_assert_eq!(removed.is_some(), model_remove(&mut model, k));
                }
                Op::Access(k) => {
                    let before = keys_of(&tree);
                    let hit = tree.access(&k);
                    if model.binary_search(&k).is_ok() {
                        prop_assert_eq!(tree.root_key(), Some(&k));
                        prop_assert_eq!(hit, tree.get_root());
                    } else {
                        prop_assert_eq!(hit, None);
                    }
                    prop_assert_eq!(keys_of(&tree), before);
                }
            }
            prop_assert!(tree.validate().is_ok(), "{:?}", tree.validate());
            prop_assert_eq!(tree.len(), model.len());
            prop_assert_eq!(keys_of(&tree), model.clone());
        }
    }

    #[test]
    fn erase_then_access_is_absent(keys in prop::collection::btree_set(any::<i32>(), 1..64), pick in any::<prop::sample::Index>()) {
        let keys: Vec<i32> = keys.into_iter().collect();
        let mut tree = SplayTree::new();
        for &k in &keys {
            tree.insert(k);
        }
        let k = keys[pick.index(keys.len())];
        prop_assert_eq!(tree.erase(&k), Some(k));
        prop_assert_eq!(tree.access(&k), None);
        prop_assert_eq!(tree.len(), keys.len() - 1);
        prop_assert!(tree.validate().is_ok());
    }

    #[test]
    fn join_concatenates_in_order(keys in prop::collection::btree_set(-1000i32..1000, 0..80), split in any::<prop::sample::Index>()) {
        let keys: Vec<i32> = keys.into_iter().collect();
        let at = split.index(keys.len() + 1);
        let (low_keys, high_keys) = keys.split_at(at);

        let mut low = SplayTree::new();
        for &k in low_keys.iter().rev() {
            low.insert(k);
        }
        let mut high = SplayTree::new();
        for &k in high_keys {
            high.insert(k);
        }
        // Scatter the shapes before joining.
        for &k in high_keys.iter().step_by(3) {
            high.access(&k);
        }

        let low_root = low.root_key().copied();
        let joined = low.join(high);
        prop_assert!(joined.validate().is_ok());
        if high_keys.is_empty() {
            prop_assert_eq!(joined.root_key().copied(), low_root);
        }
        prop_assert_eq!(joined.keys().into_iter().copied().collect::<Vec<_>>(), keys.clone());
        // An empty right side leaves the left tree as it was; otherwise the
        // left maximum is splayed on top.
        if let (Some(max_low), false) = (low_keys.last(), high_keys.is_empty()) {
            prop_assert_eq!(joined.root_key(), Some(max_low));
        }
    }

    #[test]
    fn failed_access_keeps_content(keys in prop::collection::vec(-50i32..50, 1..60), missing in 50i32..100) {
        let mut tree = SplayTree::new();
        for &k in &keys {
            tree.insert(k);
        }
        let before = tree.to_string();
        prop_assert_eq!(tree.access(&missing), None);
        prop_assert_eq!(tree.to_string(), before);
        // Every key is below the missing one, so the maximum was visited last.
        prop_assert_eq!(tree.root_key(), tree.last());
    }
}

/// Key that counts how often it is dropped.
#[derive(Debug)]
struct Tracked {
    key: u32,
    drops: Rc<Cell<usize>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tracked {}

impl PartialOrd for Tracked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tracked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[test]
fn every_key_dropped_exactly_once() {
    let drops = Rc::new(Cell::new(0));
    let tracked = |key: u32| Tracked {
        key,
        drops: Rc::clone(&drops),
    };

    let mut created = 0;
    let mut tree = SplayTree::new();
    for key in [7, 3, 9, 1, 5, 3, 8] {
        tree.insert(tracked(key));
        created += 1;
    }
    for key in [3, 9, 42] {
        let target = tracked(key);
        created += 1;
        drop(tree.erase(&target));
    }
    for key in [10, 11] {
        tree.insert(tracked(key));
        created += 1;
    }
    tree.clear();
    assert_eq!(drops.get(), created);

    for key in 0..20 {
        tree.insert(tracked(key));
        created += 1;
    }
    drop(tree);
    assert_eq!(drops.get(), created);
}

#[test]
fn join_keeps_every_key_alive_once() {
    let drops = Rc::new(Cell::new(0));
    let tracked = |key: u32| Tracked {
        key,
        drops: Rc::clone(&drops),
    };

    let mut low = SplayTree::new();
    let mut high = SplayTree::new();
    for key in 0..10 {
        low.insert(tracked(key));
        high.insert(tracked(key + 100));
    }
    low.erase(&tracked(4));
    high.erase(&tracked(104));
    let after_erase = drops.get();
    assert_eq!(after_erase, 4);

    let mut joined = low.join(high);
    assert_eq!(drops.get(), after_erase);
    assert_eq!(joined.len(), 18);
    joined.clear();
    assert_eq!(drops.get(), after_erase + 18);
}

#[test]
fn randomized_against_btree_model() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = StdRng::seed_from_u64(0x5b1a_7e3e);
    let mut tree = SplayTree::with_capacity(256);
    let mut model = BTreeSet::new();

    for round in 0..20_000 {
        let key: u32 = rng.gen_range(0..512);
        match rng.gen_range(0..3) {
            0 => {
                if model.insert(key) {
                    tree.insert(key);
                }
            }
            1 => assert_eq!(tree.erase(&key).is_some(), model.remove(&key)),
            _ => assert_eq!(tree.contains(&key), model.contains(&key)),
        }
        if round % 1000 == 0 {
            tree.validate().unwrap();
            assert!(tree.keys().into_iter().eq(model.iter()));
        }
    }
    assert_eq!(tree.len(), model.len());
    assert_eq!(tree.first(), model.first());
    assert_eq!(tree.last(), model.last());
}

#[test]
fn ascending_run_then_clear_does_not_overflow_stack() {
    let mut tree = SplayTree::new();
    for k in 0..300_000u32 {
        tree.insert(k);
    }
    // Ascending inserts leave a left chain under the maximum.
    assert_eq!(tree.root_key(), Some(&299_999));
    tree.validate().unwrap();
    assert_eq!(tree.keys().len(), 300_000);
    assert_eq!(tree.to_string().split(' ').count(), 300_000);
    tree.access(&0);
    assert_eq!(tree.root_key(), Some(&0));
    tree.clear();
    assert!(tree.is_empty());
}
