use avl::balanced::Tree;
use avl::InvariantViolation;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use std::collections::HashSet;

use crate::init_tracing;

/// The worst case AVL height for `n` values.
fn height_bound(n: usize) -> f64 {
    1.44 * ((n + 2) as f64).log2() - 0.328
}

/// Inserts every value, checking the tree after each insert.
fn build_checked<T>(xs: &[T]) -> Result<Tree<T>, InvariantViolation>
where
    T: Ord + Clone,
{
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(x.clone());
        tree.check_invariants()?;
    }
    Ok(tree)
}

#[test]
fn random_inserts_respect_height_bound() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(0);

    let mut tree = Tree::new();
    for n in 1..=4_000 {
        tree.insert(rng.gen_range(-10_000..10_000));
        assert!((tree.height() as f64) <= height_bound(n));
    }
    assert_eq!(tree.len(), 4_000);
    assert_eq!(tree.check_invariants(), Ok(()));
}

#[test]
fn sorted_inserts_respect_height_bound() {
    init_tracing();
    let tree: Tree<_> = (0..3_000).collect();

    assert!((tree.height() as f64) <= height_bound(3_000));
    assert_eq!(tree.check_invariants(), Ok(()));
    assert_eq!(tree.min(), Some(&0));
    assert_eq!(tree.max(), Some(&2_999));
}

#[test]
fn shuffled_inserts_iterate_sorted() {
    init_tracing();
    let mut values: Vec<i32> = (0..2_000).collect();
    values.shuffle(&mut StdRng::seed_from_u64(7));

    let tree: Tree<_> = values.iter().copied().collect();

    assert!(tree.iter().copied().eq(0..2_000));
    assert!(values.iter().all(|x| tree.contains(x)));
    assert!(!tree.contains(&2_000));
}

#[test]
fn duplicate_heavy_inserts_stay_balanced() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(42);
    let values: Vec<u8> = (0..1_000).map(|_| rng.gen_range(0..4)).collect();

    let tree = build_checked(&values).expect("tree stays valid");

    let mut sorted = values.clone();
    sorted.sort();
    assert!(tree.iter().eq(sorted.iter()));
    assert!((tree.height() as f64) <= height_bound(values.len()));
}

#[test]
fn extend_keeps_existing_values() {
    let mut tree: Tree<_> = vec!["m", "c", "x"].into_iter().collect();
    tree.extend(["a", "z", "c"]);

    assert_eq!(tree.len(), 6);
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        ["a", "c", "c", "m", "x", "z"]
    );
}

quickcheck::quickcheck! {
    fn stays_valid(xs: Vec<i8>) -> bool {
        build_checked(&xs).is_ok()
    }
}

quickcheck::quickcheck! {
    fn in_order_is_sorted_multiset(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let mut sorted = xs;
        sorted.sort();

        tree.len() == sorted.len() && tree.iter().eq(sorted.iter())
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn contains_is_idempotent(xs: Vec<i8>, probe: i8) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let shape: Vec<i8> = tree.pre_order().into_iter().copied().collect();
        let height = tree.height();

        let first = tree.contains(&probe);
        let second = tree.contains(&probe);
        let after: Vec<i8> = tree.pre_order().into_iter().copied().collect();

        first == second && shape == after && height == tree.height()
    }
}
