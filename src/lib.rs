//! In-place binary max-heap algorithms over slices
//!
//! This crate provides the classic heap algorithm family as free functions
//! over `&mut [T]` — the slice is the heap, nothing is stored — extended
//! with the three capabilities that turn it into a building block for
//! schedulers, Dijkstra-style relaxation and kinetic data structures:
//!
//! - **Positional mutation**: [`pop_heap_at`] removes the element at an
//!   arbitrary known slot and [`update_heap`] re-heapifies after an in-place
//!   edit, both in O(log n).
//! - **Move observation**: every operation has a `*_watched` variant that
//!   reports each relocation to a [`MoveObserver`], which is what lets a
//!   caller keep an external handle → slot index current
//!   ([`tracking::PositionTracker`] is a ready-made one).
//! - **Parallel construction**: [`parallel_make_heap`] builds the heap with
//!   a block-partitioned multithreaded sift-down sweep, coordinated by a
//!   [`RollingBarrier`] that tracks data dependencies between subtree
//!   regions.
//!
//! Heaps are max-heaps under the comparator: no child compares greater than
//! its parent. The default comparator is `T: Ord`'s less-than; every
//! operation has a `_by` variant taking `is_less: FnMut(&T, &T) -> bool`,
//! which must induce a strict weak order.
//!
//! # Example
//!
//! ```rust
//! use slice_heap::{is_heap, make_heap, pop_heap_at, push_heap, sort_heap, update_heap};
//!
//! let mut v = vec![4, 1, 3, 2, 16, 9, 10, 14, 8, 7];
//! make_heap(&mut v);
//! assert_eq!(v[0], 16);
//!
//! // Remove whatever currently sits in slot 4.
//! pop_heap_at(&mut v, 4);
//! v.pop();
//!
//! // Re-key slot 7 and repair.
//! v[7] = 20;
//! update_heap(&mut v, 7);
//! assert_eq!(v[0], 20);
//!
//! // Grow it again, then drain into sorted order.
//! v.push(12);
//! push_heap(&mut v);
//! assert!(is_heap(&v));
//! sort_heap(&mut v);
//! assert_eq!(v, [1, 3, 4, 8, 9, 10, 12, 14, 16, 20]);
//! ```

pub mod barrier;
pub mod basic;
pub mod observer;
pub mod parallel;
pub mod positional;
mod sift;
pub mod tracking;

pub use barrier::RollingBarrier;
pub use basic::{
    is_heap, is_heap_by, is_heap_until, is_heap_until_by, make_heap, make_heap_by,
    make_heap_by_watched, make_heap_watched, pop_heap, pop_heap_by, pop_heap_by_watched,
    pop_heap_watched, push_heap, push_heap_by, push_heap_by_watched, push_heap_watched, sort_heap,
    sort_heap_by, sort_heap_by_watched, sort_heap_watched,
};
pub use observer::{MoveObserver, NoopObserver, SharedMoveObserver};
pub use parallel::{
    parallel_make_heap, parallel_make_heap_by, parallel_make_heap_by_watched, BuildError,
};
pub use positional::{
    pop_heap_at, pop_heap_at_by, pop_heap_at_by_watched, pop_heap_at_watched, update_heap,
    update_heap_by, update_heap_by_watched, update_heap_watched,
};
