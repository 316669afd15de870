use weighted_bst::{SearchOutcome, Tree, Weight};

use std::collections::{BTreeMap, HashSet};

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a map.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of weights in the map.
fn do_ops<V>(ops: &[Op<i8, V>], bst: &mut Tree<V>, map: &mut BTreeMap<Weight, V>)
where
    V: std::fmt::Debug + PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(Weight::from(*k), v.clone());
                map.insert(Weight::from(*k), v.clone());
            }
            Op::Remove(k) => {
                assert_eq!(bst.delete(Weight::from(*k)), map.remove(&Weight::from(*k)));
            }
        }
    }
}

/// Whether every child in the tree points back at the node it hangs from.
fn parents_consistent<V>(tree: &Tree<V>) -> bool {
    let mut pending: Vec<_> = tree.root().into_iter().collect();
    while let Some(id) = pending.pop() {
        let node = match tree.get(id) {
            Some(node) => node,
            None => return false,
        };
        for child in node.left().into_iter().chain(node.right()) {
            match tree.get(child) {
                Some(child_node) if child_node.parent() == Some(id) => pending.push(child),
                _ => return false,
            }
        }
    }
    true
}

fn weights<V>(tree: &Tree<V>) -> Vec<Weight> {
    let mut weights = Vec::new();
    tree.traverse(|weight| weights.push(weight));
    weights
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = Tree::default();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map);
    map.iter().all(|(key, value)| tree.find(*key) == Some(value))
        && tree.len() == map.len()
        && tree.iter().eq(map.iter().map(|(k, v)| (*k, v)))
}

#[quickcheck]
fn traversal_is_strictly_ascending(xs: Vec<i8>) -> bool {
    let tree: Tree<()> = xs.iter().map(|x| (Weight::from(*x), ())).collect();

    let weights = weights(&tree);
    weights.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn upsert_keeps_last_value(weight: i8, first: u8, second: u8) -> bool {
    let mut tree = Tree::new(Weight::from(weight), first);
    tree.insert(Weight::from(weight), second);

    tree.len() == 1 && tree.find(Weight::from(weight)) == Some(&second)
}

#[quickcheck]
fn deletion_preserves_ordering(ops: Vec<Op<i8, ()>>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::default();
    let mut map = BTreeMap::new();
    do_ops(&ops, &mut tree, &mut map);

    deletes.iter().all(|delete| {
        let weight = Weight::from(*delete);
        let was_present = tree.contains_weight(weight);
        let deleted = tree.delete(weight).is_some();

        deleted == was_present
            && tree.is_valid()
            && parents_consistent(&tree)
            && !weights(&tree).contains(&weight)
    })
}

#[quickcheck]
fn parents_stay_consistent(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = Tree::default();
    let mut map = BTreeMap::new();

    ops.chunks(3).all(|chunk| {
        do_ops(chunk, &mut tree, &mut map);
        parents_consistent(&tree)
    })
}

#[quickcheck]
fn min_and_max_bound_the_tree(xs: Vec<i8>) -> bool {
    let tree: Tree<()> = xs.iter().map(|x| (Weight::from(*x), ())).collect();

    match (tree.find_minimum(), tree.find_maximum()) {
        (Ok(min), Ok(max)) => {
            let smallest = tree.get(min).map(|n| n.weight());
            let largest = tree.get(max).map(|n| n.weight());
            smallest == xs.iter().min().map(|x| Weight::from(*x))
                && largest == xs.iter().max().map(|x| Weight::from(*x))
                && tree.find_minimum() == Ok(min)
                && tree.find_maximum() == Ok(max)
        }
        (Err(_), Err(_)) => xs.is_empty(),
        _ => false,
    }
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().map(|x| (Weight::from(*x), *x)).collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(Weight::from(*x)).is_none())
}

#[quickcheck]
fn search_finds_values_ordered_like_weights(xs: Vec<i8>) -> bool {
    // Values equal to their weights so both orderings agree.
    let tree: Tree<i8> = xs.iter().map(|x| (Weight::from(*x), *x)).collect();
    let root = match tree.root() {
        Some(root) => root,
        None => return xs.is_empty(),
    };

    xs.iter().all(|x| match tree.search(root, x) {
        Ok(SearchOutcome::Found(id)) => tree.get(id).map(|n| n.weight()) == Some(Weight::from(*x)),
        _ => false,
    })
}

#[test]
fn ascending_chain_is_still_balanced() {
    let tree: Tree<()> = (0..64).map(|w| (w, ())).collect();

    assert_eq!(tree.height(), 64);
    assert_eq!(
        tree.is_balanced(tree.root(), Weight::MIN, Weight::MAX),
        Ok(true)
    );
}

#[test]
fn deleting_two_child_root_promotes_successor() {
    let mut tree = Tree::new(5, 5);
    for weight in [1, 2, 3, 4, 6, 7] {
        tree.insert(weight, weight);
    }
    assert_eq!(weights(&tree), [1, 2, 3, 4, 5, 6, 7]);

    assert_eq!(tree.delete(5), Some(5));

    let root = tree.root().unwrap();
    assert_eq!(tree.get(root).unwrap().weight(), 6);
    assert_eq!(weights(&tree), [1, 2, 3, 4, 6, 7]);
}
