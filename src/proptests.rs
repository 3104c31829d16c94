use super::*;

use crate::poplar::{hyperfloor, largest_poplar, last_poplar, sift, SMALL_POPLAR_SIZE};
use proptest::prelude::*;

/// Checks the poplar property recursively over one poplar.
fn naive_is_poplar(p: &[i32]) -> bool {
    if p.len() < 2 {
        return true;
    }
    let root = p[p.len() - 1];
    let half = p.len() / 2;
    root >= p[half - 1]
        && root >= p[p.len() - 2]
        && naive_is_poplar(&p[..half])
        && naive_is_poplar(&p[half..p.len() - 1])
}

/// Splits `v` greedily into poplars and checks each one.
fn naive_is_forest(v: &[i32]) -> bool {
    let mut start = 0;
    while start < v.len() {
        let size = largest_poplar(v.len() - start);
        if !naive_is_poplar(&v[start..start + size]) {
            return false;
        }
        start += size;
    }
    true
}

fn values() -> impl Strategy<Value = Vec<i32>> {
    // A narrow range so duplicates are common.
    prop::collection::vec(-50i32..50, 0..300)
}

proptest! {
    #[test]
    fn prop_hyperfloor_is_largest_power_of_two(n in 1usize..) {
        let h = hyperfloor(n);
        prop_assert!(h.is_power_of_two());
        prop_assert!(h <= n);
        prop_assert!(n / 2 < h);
    }

    #[test]
    fn prop_last_poplar_matches_greedy_split(len in 1usize..100_000) {
        let mut rest = len;
        let mut last = 0;
        while rest > 0 {
            last = largest_poplar(rest);
            rest -= last;
        }
        prop_assert_eq!(last_poplar(len), last);
    }

    #[test]
    fn prop_make_heap_builds_forest(mut v in values()) {
        make_heap(&mut v);
        prop_assert!(naive_is_forest(&v));
        prop_assert!(is_heap(&v));
    }

    #[test]
    fn prop_is_heap_agrees_with_naive_check(v in prop::collection::vec(0i32..4, 0..40)) {
        prop_assert_eq!(is_heap(&v), naive_is_forest(&v));
        let until = is_heap_until(&v);
        prop_assert!(naive_is_forest(&v[..until]));
    }

    #[test]
    fn prop_corrupted_heap_agrees_with_naive_check(
        mut v in values(),
        index in any::<prop::sample::Index>(),
        value in -60i32..60,
    ) {
        make_heap(&mut v);
        if !v.is_empty() {
            let i = index.index(v.len());
            v[i] = value;
        }
        prop_assert_eq!(is_heap(&v), naive_is_forest(&v));
    }

    #[test]
    fn prop_pop_heap_moves_maximum(mut v in values()) {
        make_heap(&mut v);
        loop {
            let Some(max) = v.iter().max().copied() else {
                break;
            };
            pop_heap(&mut v);
            prop_assert_eq!(v.pop(), Some(max));
            prop_assert!(naive_is_forest(&v));
        }
    }

    #[test]
    fn prop_push_heap_keeps_forest(input in values()) {
        let mut v = Vec::with_capacity(input.len());
        for x in input {
            v.push(x);
            push_heap(&mut v);
            prop_assert!(naive_is_forest(&v));
        }
    }

    #[test]
    fn prop_sort_matches_std(mut v in values()) {
        let mut expected = v.clone();
        expected.sort();
        sort(&mut v);
        prop_assert_eq!(v, expected);
    }

    #[test]
    fn prop_sort_by_descending_matches_std(mut v in values()) {
        let mut expected = v.clone();
        expected.sort_by(|a, b| b.cmp(a));
        sort_by(&mut v, |a, b| a > b);
        prop_assert_eq!(v, expected);
    }

    #[test]
    fn prop_sift_repairs_root(
        mut children in prop::collection::vec(-50i32..50, 30),
        root in -60i32..60,
    ) {
        // Two valid poplars of 15 (sorted runs) below a random root.
        children[..SMALL_POPLAR_SIZE].sort();
        children[SMALL_POPLAR_SIZE..].sort();
        children.push(root);

        let mut expected = children.clone();
        sift(&mut children, &mut i32::lt);
        prop_assert!(naive_is_poplar(&children));

        children.sort();
        expected.sort();
        prop_assert_eq!(children, expected);
    }
}
