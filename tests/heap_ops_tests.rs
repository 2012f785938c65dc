//! End-to-end scenarios for the sequential heap operations
//!
//! Deterministic cases first (small, hand-checkable arrays), then randomized
//! cross-checks against plain sorting and against
//! `std::collections::BinaryHeap` as a reference model.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BinaryHeap;

use slice_heap::{
    is_heap, make_heap, pop_heap, pop_heap_at, push_heap, sort_heap, update_heap,
};

#[test]
fn build_from_textbook_input() {
    let mut v = [4, 1, 3, 2, 16, 9, 10, 14, 8, 7];
    make_heap(&mut v);
    assert!(is_heap(&v));
    assert_eq!(v[0], 16);
}

#[test]
fn successive_pops_deposit_maxima_in_order() {
    let mut v = [4, 1, 3, 2, 16, 9, 10, 14, 8, 7];
    make_heap(&mut v);
    pop_heap(&mut v);
    assert_eq!(v[9], 16);
    pop_heap(&mut v[..9]);
    assert_eq!(v[8], 14);
    pop_heap(&mut v[..8]);
    assert_eq!(v[7], 10);
    assert!(is_heap(&v[..7]));
}

#[test]
fn make_then_sort_orders_ascending() {
    let mut v = [5, 2, 8, 1, 9, 3];
    make_heap(&mut v);
    sort_heap(&mut v);
    assert_eq!(v, [1, 2, 3, 5, 8, 9]);
}

#[test]
fn pop_at_extracts_interior_element() {
    let mut v = [16, 14, 10, 8, 7, 9, 3, 2, 4, 1];
    assert!(is_heap(&v));
    pop_heap_at(&mut v, 4);
    assert_eq!(v[9], 7);
    assert!(is_heap(&v[..9]));
}

#[test]
fn update_bubbles_grown_key_to_root() {
    let mut v = [16, 14, 10, 8, 7, 9, 3, 2, 4, 1];
    v[7] = 20;
    update_heap(&mut v, 7);
    assert_eq!(v[0], 20);
    assert!(is_heap(&v));
}

#[test]
fn two_element_transitions() {
    let mut v = [3, 7];
    make_heap(&mut v);
    assert_eq!(v, [7, 3]);
    pop_heap(&mut v);
    assert_eq!(v, [3, 7]);

    let mut w = [7, 3, 9];
    push_heap(&mut w);
    assert_eq!(w, [9, 3, 7]);
}

#[test]
fn empty_range_is_a_fixed_point() {
    let mut v: Vec<i32> = Vec::new();
    make_heap(&mut v);
    push_heap(&mut v);
    pop_heap(&mut v);
    sort_heap(&mut v);
    assert!(v.is_empty());
    assert!(is_heap(&v));
}

#[test]
fn heapsort_matches_sort_unstable() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0001);
    for n in [0usize, 1, 2, 3, 10, 100, 1000] {
        let mut v: Vec<i64> = (0..n).map(|_| rng.gen_range(-500..500)).collect();
        let mut expected = v.clone();
        expected.sort_unstable();
        make_heap(&mut v);
        assert!(is_heap(&v), "make_heap broke for n={n}");
        sort_heap(&mut v);
        assert_eq!(v, expected, "sort_heap mismatch for n={n}");
    }
}

#[test]
fn incremental_push_agrees_with_binary_heap() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0002);
    let mut ours: Vec<i32> = Vec::new();
    let mut reference = BinaryHeap::new();
    for _ in 0..500 {
        if rng.gen_bool(0.6) || ours.is_empty() {
            let x = rng.gen_range(0..100);
            ours.push(x);
            push_heap(&mut ours);
            reference.push(x);
        } else {
            pop_heap(&mut ours);
            let got = ours.pop().unwrap();
            let expected = reference.pop().unwrap();
            assert_eq!(got, expected);
        }
        assert!(is_heap(&ours));
        assert_eq!(ours.first(), reference.peek());
    }
}

#[test]
fn random_interior_removals_keep_the_heap_honest() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0003);
    let mut v: Vec<u32> = (0..200).collect();
    v.shuffle(&mut rng);
    make_heap(&mut v);

    let mut live: Vec<u32> = v.clone();
    while !v.is_empty() {
        let pos = rng.gen_range(0..v.len());
        let expected = v[pos];
        pop_heap_at(&mut v, pos);
        assert_eq!(*v.last().unwrap(), expected);
        v.pop();
        assert!(is_heap(&v));

        let at = live.iter().position(|&x| x == expected).unwrap();
        live.swap_remove(at);
        let mut a = v.clone();
        let mut b = live.clone();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b, "multiset diverged");
    }
}

#[test]
fn random_updates_preserve_multiset_and_shape() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0004);
    let mut v: Vec<i64> = (0..128).map(|_| rng.gen_range(-1000..1000)).collect();
    make_heap(&mut v);
    for _ in 0..1000 {
        let pos = rng.gen_range(0..v.len());
        let new_key = rng.gen_range(-1000..1000);
        v[pos] = new_key;
        update_heap(&mut v, pos);
        assert!(is_heap(&v));
        assert!(v.contains(&new_key));
    }
}
