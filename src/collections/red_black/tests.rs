#![cfg(test)]

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::*;
use crate::util::alloc::DropCounter;

fn values<T: Copy>(tree: &RedBlackTree<T>) -> Vec<T> {
    tree.iter().copied().collect()
}

#[test]
fn test_insert_scenario() {
    let tree = RedBlackTree::from([5, 3, 8, 1, 4, 7, 9]);

    assert_eq!(values(&tree), [1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(tree.len(), 7);
    assert_eq!(tree.validate(), Ok(()));

    let root = tree.root().expect("tree isn't empty");
    assert!(root.is_black(), "The root should always be black.");
    assert_eq!(*root.value(), 5);
    assert_eq!(tree.top(), Ok(&5));
    assert_eq!(tree.height(), 3);
}

#[test]
fn test_ascending_inserts_stay_balanced() {
    let tree: RedBlackTree<_> = (1..=7).collect();

    assert_eq!(tree.validate(), Ok(()));
    assert!(
        tree.height() <= 4,
        "Ascending inserts should be rebalanced, got a height of {}.",
        tree.height()
    );

    let tree: RedBlackTree<_> = (0..1024).collect();
    assert_eq!(tree.validate(), Ok(()));
    assert!(
        tree.height() <= 2 * 11,
        "Height should stay below 2 * log2(n + 1), got {}.",
        tree.height()
    );
}

#[test]
fn test_insert_rotation_cases() {
    // Both straight chains, then both bent ones.
    for order in [[1, 2, 3], [3, 2, 1], [1, 3, 2], [3, 1, 2]] {
        let tree = RedBlackTree::from(order);
        let root = tree.root().expect("tree isn't empty");

        assert_eq!(
            *root.value(), 2,
            "Inserting {order:?} should leave the middle value at the root."
        );
        assert!(root.is_black());
        assert!(root.left().is_some_and(|l| l.is_red() && *l.value() == 1));
        assert!(root.right().is_some_and(|r| r.is_red() && *r.value() == 3));
    }
}

#[test]
fn test_duplicate_insert() {
    let mut tree = RedBlackTree::new();
    assert!(tree.insert(5));
    assert!(!tree.insert(5), "A duplicate insert should be rejected.");
    assert!(!tree.insert(5));

    assert_eq!(tree.len(), 1);
    assert_eq!(values(&tree), [5]);
    assert!(tree.root().is_some_and(|r| r.is_leaf()));
}

#[test]
fn test_empty_access() {
    let mut tree = RedBlackTree::from_value(10);
    assert_eq!(tree.remove(&10), Some(10));

    assert!(tree.is_empty());
    assert_eq!(tree.min(), Err(EmptyContainer));
    assert_eq!(tree.max(), Err(EmptyContainer));
    assert_eq!(tree.top(), Err(EmptyContainer));
    assert_eq!(tree.pop_min(), Err(EmptyContainer));
    assert_eq!(tree.pop_max(), Err(EmptyContainer));
    assert_eq!(tree.pop_top(), Err(EmptyContainer));
    assert!(tree.root().is_none());
    assert_eq!(
        EmptyContainer.to_string(),
        "Unable to access an element of an empty collection!"
    );
}

#[test]
fn test_min_max_pop() {
    let mut tree = RedBlackTree::from([4, 2, 6, 1, 3, 5, 7]);
    assert_eq!(tree.min(), Ok(&1));
    assert_eq!(tree.max(), Ok(&7));

    assert_eq!(tree.pop_min(), Ok(1));
    assert_eq!(tree.pop_max(), Ok(7));
    assert_eq!(tree.validate(), Ok(()));

    let top = *tree.top().expect("tree isn't empty");
    assert_eq!(tree.pop_top(), Ok(top));
    assert!(!tree.contains(&top));
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.validate(), Ok(()));
}

#[test]
fn test_remove_with_two_children() {
    let mut tree = RedBlackTree::from([5, 3, 8, 1, 4, 7, 9]);

    assert_eq!(tree.remove(&5), Some(5));
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(
        tree.top(),
        Ok(&7),
        "The in-order successor should take the removed node's place."
    );
    assert_eq!(values(&tree), [1, 3, 4, 7, 8, 9]);

    assert_eq!(tree.remove(&3), Some(3));
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(values(&tree), [1, 4, 7, 8, 9]);
}

#[test]
fn test_remove_black_leaf() {
    // Leaves 1 as a black leaf whose sibling subtree is rooted at a red node.
    let mut tree: RedBlackTree<_> = (1..=7).collect();
    let root = tree.root().expect("tree isn't empty");
    assert!(root.left().is_some_and(|l| l.is_black() && l.is_leaf()));
    assert!(root.right().is_some_and(|r| r.is_red()));

    assert_eq!(tree.remove(&1), Some(1));
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(tree.top(), Ok(&4));
    assert_eq!(values(&tree), [2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_remove_everything() {
    let mut tree: RedBlackTree<_> = (0..200).map(|i| (i * 37) % 200).collect();

    for i in (0..200).rev().step_by(3).chain((0..200).step_by(2)) {
        tree.remove(&i);
        assert!(!tree.contains(&i));
        assert_eq!(tree.validate(), Ok(()), "Tree broke after removing {i}.");
    }

    while let Ok(value) = tree.pop_top() {
        assert!(!tree.contains(&value));
        assert_eq!(tree.validate(), Ok(()));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
}

#[test]
fn test_remove_missing() {
    let mut tree = RedBlackTree::from([1, 2, 3]);
    assert_eq!(tree.remove(&4), None);
    assert_eq!(tree.len(), 3);
    assert_eq!(values(&tree), [1, 2, 3]);

    let mut empty = RedBlackTree::<i32>::new();
    assert_eq!(empty.remove(&1), None);
}

#[test]
fn test_find() {
    let tree = RedBlackTree::from(["b", "a", "c"]);

    let node = tree.find("a").expect("a is present");
    assert_eq!(*node.value(), "a");
    assert!(node.is_leaf());
    assert_eq!(node.subtree_root(), tree.root().expect("tree isn't empty"));
    assert_eq!(*node.parent().expect("a isn't the root").value(), "b");

    let root = node.subtree_root();
    assert_eq!(*root.min_descendant().value(), "a");
    assert_eq!(*root.max_descendant().value(), "c");
    assert!(root.parent().is_none());

    assert!(tree.find("d").is_none());
    assert_eq!(tree.get("c"), Some(&"c"));
    assert!(tree.contains("b"));
    assert!(!tree.contains("z"));
}

#[test]
fn test_borrowed_lookup() {
    let tree: RedBlackTree<String> = ["pear", "apple", "fig"].map(String::from).into();
    assert!(tree.contains("fig"));
    assert_eq!(tree.get("apple").map(String::as_str), Some("apple"));
}

#[test]
fn test_equality() {
    let a = RedBlackTree::from([1, 2, 3]);
    let b = RedBlackTree::from([3, 2, 1]);

    assert_eq!(values(&a), values(&b));
    assert_eq!(a, b, "Trees with the same values should be equal regardless of shape.");
    assert_ne!(a, RedBlackTree::from([1, 2]));
    assert_ne!(a, RedBlackTree::from([1, 2, 4]));
    assert_eq!(
        RedBlackTree::<i32>::new(),
        RedBlackTree::new(),
        "Two empty trees should be equal."
    );
}

#[test]
fn test_merge() {
    let mut a = RedBlackTree::from([1, 3, 5]);
    let mut b = RedBlackTree::from([2, 4, 6, 5]);

    a.merge(&mut b);
    assert_eq!(values(&a), [1, 2, 3, 4, 5, 6]);
    assert!(b.is_empty(), "The merged tree should be left empty.");
    assert_eq!(a.validate(), Ok(()));
}

#[test]
fn test_clear_and_swap() {
    let mut a = RedBlackTree::from([1, 2, 3]);
    let mut b = RedBlackTree::from([9]);

    a.swap(&mut b);
    assert_eq!(values(&a), [9]);
    assert_eq!(values(&b), [1, 2, 3]);

    assert_eq!(b.clear(), 3);
    assert!(b.is_empty());
    assert!(b.root().is_none());
    assert!(b.insert(4), "A cleared tree should be usable again.");
    assert_eq!(b.validate(), Ok(()));
}

#[test]
fn test_replace() {
    let mut tree = RedBlackTree::from([1, 2, 3]);

    assert_eq!(tree.replace(&2, 20), Some(2));
    assert_eq!(values(&tree), [1, 3, 20]);

    assert_eq!(tree.replace(&5, 50), None);
    assert_eq!(values(&tree), [1, 3, 20], "Nothing should change when the old value is missing.");
    assert_eq!(tree.validate(), Ok(()));
}

#[test]
fn test_subtree() {
    let tree = RedBlackTree::from([5, 3, 8, 1, 4, 7, 9]);

    let left = tree.subtree(&3).expect("3 is present");
    assert_eq!(values(&left), [1, 3, 4]);
    assert_eq!(left.top(), Ok(&3));
    assert_eq!(left.validate(), Ok(()));

    let whole = tree.subtree(&5).expect("5 is present");
    assert_eq!(whole, tree);
    assert!(tree.subtree(&6).is_none());

    // The copy is rebalanced as it's built, so its root can differ from the source's.
    let tree = RedBlackTree::from([4, 2, 6, 1, 3]);
    assert_eq!(tree.top(), Ok(&4));
    let whole = tree.subtree(&4).expect("4 is present");
    assert_eq!(whole, tree);
    assert_eq!(whole.top(), Ok(&2));
    assert_eq!(whole.validate(), Ok(()));
}

#[test]
fn test_clone() {
    let tree: RedBlackTree<_> = (0..50).rev().collect();
    let copy = tree.clone();

    assert_eq!(copy, tree);
    assert_eq!(copy.validate(), Ok(()));
}

#[test]
fn test_iterators() {
    let tree = RedBlackTree::from([4, 1, 3, 2, 5]);

    let mut iter = tree.iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&5));
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.clone().collect::<Vec<_>>(), [&2, &3, &4]);
    assert_eq!(iter.next_back(), Some(&4));
    assert_eq!(iter.next(), Some(&2));
    assert_eq!(iter.next(), Some(&3));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);

    assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
    assert_eq!(tree.into_iter().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);

    assert_eq!(RedBlackTree::<u8>::new().iter().next(), None);
}

#[test]
fn test_drops() {
    let counter = DropCounter::new();
    let mut tree = RedBlackTree::new();

    for key in 0..10 {
        assert!(tree.insert(counter.track(key)));
    }
    assert!(!tree.insert(counter.track(3)));
    assert_eq!(counter.dropped(), 1, "A rejected duplicate should be dropped.");

    assert!(tree.remove(&counter.track(4)).is_some());
    assert_eq!(counter.dropped(), 3, "Both the probe and the removed value should be dropped.");

    assert_eq!(tree.clear(), 9);
    assert_eq!(counter.dropped(), 12, "Clearing should drop every remaining value once.");

    let tree: RedBlackTree<_> = (0..5).map(|key| counter.track(key)).collect();
    let mut owned = tree.into_iter();
    assert_eq!(owned.next().map(|v| v.key), Some(0));
    drop(owned);
    assert_eq!(counter.dropped(), 17);
}

#[test]
fn test_formatting() {
    assert_eq!(RedBlackTree::from([3, 1, 2]).to_string(), "{ 1, 2, 3 }");
    assert_eq!(RedBlackTree::<i32>::new().to_string(), "{ }");

    let debug = format!("{:?}", RedBlackTree::from([2, 1, 3]));
    assert!(debug.starts_with("RedBlackTree"));
    assert!(debug.contains("(2: black)"));
    assert!(debug.contains("(1: red)"));
}

#[test]
fn test_tracing() {
    use simplelog::{Config, LevelFilter, TestLogger};

    // Another test may have installed the logger already.
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());

    let mut tree: RedBlackTree<_> = (0..16).collect();
    for i in 0..8 {
        tree.remove(&(i * 2));
    }
    assert_eq!(tree.validate(), Ok(()));
}

#[cfg(feature = "traits")]
#[test]
fn test_set_operations() {
    use crate::collections::traits::Set;

    let a = RedBlackTree::from([1, 2, 3, 4]);
    let b = RedBlackTree::from([3, 4, 5]);

    assert_eq!(Set::difference(&a, &b).copied().collect::<Vec<_>>(), [1, 2]);
    assert_eq!(Set::intersection(&a, &b).copied().collect::<Vec<_>>(), [3, 4]);
    assert_eq!(Set::union(&a, &b).copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    assert!(RedBlackTree::from([3, 4]).is_subset(&a));
    assert!(a.is_superset(&RedBlackTree::from([1, 4])));
    assert!(!a.is_subset(&b));
    assert!(a.is_disjoint(&RedBlackTree::from([7, 8])));
    assert!(!a.is_disjoint(&b));
}

#[test]
fn test_validate_rejects_broken_trees() {
    fn corrupt(
        values: impl IntoIterator<Item = i32>,
        damage: impl FnOnce(&mut RedBlackTree<i32>),
    ) -> Result<(), InvariantViolation> {
        let mut tree: RedBlackTree<_> = values.into_iter().collect();
        assert_eq!(tree.validate(), Ok(()), "The tree should start out valid.");
        damage(&mut tree);
        tree.validate()
    }

    fn index_of(tree: &RedBlackTree<i32>, value: i32) -> NodeIndex {
        tree.find_index(&value).expect("value is present")
    }

    // 2 is a black root with red leaves 1 and 3.
    let small = [2, 1, 3];

    assert_eq!(
        corrupt(small, |tree| {
            let root = index_of(tree, 2);
            tree.nodes[root].color = Color::Red;
        }),
        Err(InvariantViolation::RedRoot)
    );

    assert_eq!(
        corrupt(small, |tree| {
            let (root, leaf) = (index_of(tree, 2), index_of(tree, 1));
            tree.nodes[root].parent = Some(leaf);
        }),
        Err(InvariantViolation::RootHasParent)
    );

    assert_eq!(
        corrupt(small, |tree| {
            let leaf = index_of(tree, 1);
            tree.nodes[leaf].color = Color::Black;
        }),
        Err(InvariantViolation::UnevenBlackHeight {
            depth: 0,
            left: 2,
            right: 1,
        })
    );

    assert_eq!(
        corrupt(small, |tree| {
            let (low, high) = (index_of(tree, 1), index_of(tree, 3));
            tree.nodes[low].value = 3;
            tree.nodes[high].value = 1;
        }),
        Err(InvariantViolation::Unordered { position: 1 })
    );

    assert_eq!(
        corrupt(small, |tree| {
            let leaf = index_of(tree, 3);
            tree.nodes[leaf].parent = None;
        }),
        Err(InvariantViolation::BrokenParentLink { depth: 1 })
    );

    // Unhooking a red leaf keeps every black height, but the arena still holds it.
    assert_eq!(
        corrupt(small, |tree| {
            let root = index_of(tree, 2);
            tree.nodes[root].left = None;
        }),
        Err(InvariantViolation::LengthMismatch { len: 3, counted: 2 })
    );

    // Ascending 1..=7 leaves the red 4 with black children 3 and 6.
    assert_eq!(
        corrupt(1..=7, |tree| {
            let six = index_of(tree, 6);
            tree.nodes[six].color = Color::Red;
        }),
        Err(InvariantViolation::RedChildOfRed { depth: 1 })
    );
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Insert(u8),
    Remove(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..64_u8).prop_map(Op::Insert),
        (0..64_u8).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn prop_matches_model(ops in proptest::collection::vec(op(), 0..300)) {
        let mut tree = RedBlackTree::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(v) => {
                    prop_assert_eq!(tree.insert(v), model.insert(v));
                },
                Op::Remove(v) => {
                    prop_assert_eq!(tree.remove(&v), model.take(&v));
                },
            }
            prop_assert_eq!(tree.validate(), Ok(()));
        }

        prop_assert_eq!(tree.len(), model.len());
        prop_assert_eq!(tree.iter().count(), tree.len());
        prop_assert!(tree.iter().eq(model.iter()));
        prop_assert_eq!(tree.min().ok(), model.first());
        prop_assert_eq!(tree.max().ok(), model.last());
    }

    #[test]
    fn prop_insertion_order_only_changes_shape(
        shuffled in proptest::collection::hash_set(any::<i32>(), 0..200)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
    ) {
        let tree: RedBlackTree<_> = shuffled.iter().copied().collect();
        let mut sorted = shuffled.clone();
        sorted.sort();

        prop_assert_eq!(tree.validate(), Ok(()));
        prop_assert_eq!(tree.into_iter().collect::<Vec<_>>(), sorted);
    }

    #[test]
    fn prop_insert_is_idempotent(inserts in proptest::collection::vec(any::<i16>(), 1..100)) {
        let mut tree: RedBlackTree<_> = inserts.iter().copied().collect();
        let len = tree.len();

        for value in &inserts {
            prop_assert!(!tree.insert(*value));
        }
        prop_assert_eq!(tree.len(), len);
    }

    #[test]
    fn prop_remove(
        present in proptest::collection::btree_set(0..1000_u16, 0..100),
        probe in 0..1000_u16,
    ) {
        let mut tree: RedBlackTree<_> = present.iter().copied().collect();
        let before = values(&tree);

        if present.contains(&probe) {
            prop_assert_eq!(tree.remove(&probe), Some(probe));
            prop_assert!(tree.find(&probe).is_none());
            prop_assert_eq!(tree.len(), before.len() - 1);
        } else {
            prop_assert_eq!(tree.remove(&probe), None);
            prop_assert_eq!(values(&tree), before);
        }
        prop_assert_eq!(tree.validate(), Ok(()));
    }
}
