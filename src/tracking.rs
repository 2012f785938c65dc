//! External slot index maintained through move observation
//!
//! The positional operations need the caller to know where an element
//! currently lives, but every heap mutation may reshuffle the slice. A
//! [`PositionTracker`] closes that loop: plugged into the `*_watched`
//! operations as the observer, it keeps a key → slot map current, so stable
//! handles survive arbitrary sequences of pushes, pops and updates. This is
//! the array-heap equivalent of a `decrease_key` handle.
//!
//! # Example
//!
//! ```rust
//! use slice_heap::tracking::{Keyed, PositionTracker};
//! use slice_heap::{make_heap_watched, pop_heap_at_watched, update_heap_watched};
//!
//! let mut tasks = vec![
//!     Keyed::new("compile", 3u32),
//!     Keyed::new("link", 1),
//!     Keyed::new("test", 7),
//!     Keyed::new("deploy", 2),
//! ];
//! let mut index = PositionTracker::new();
//! make_heap_watched(&mut tasks, &mut index);
//! assert_eq!(tasks[index.slot_of(&"test").unwrap()].key, "test");
//!
//! // Re-prioritize "link" through its tracked slot.
//! let slot = index.slot_of(&"link").unwrap();
//! tasks[slot].priority = 9;
//! update_heap_watched(&mut tasks, slot, &mut index);
//! assert_eq!(tasks[0].key, "link");
//!
//! // Cancel "compile" wherever it currently sits.
//! let slot = index.slot_of(&"compile").unwrap();
//! pop_heap_at_watched(&mut tasks, slot, &mut index);
//! let cancelled = tasks.pop().unwrap();
//! assert_eq!(cancelled.key, "compile");
//! index.forget(&cancelled.key);
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::observer::MoveObserver;

/// Element types that expose a stable identity for slot tracking.
///
/// The key must stay constant while the element is inside a tracked heap;
/// the priority (whatever drives the comparator) is free to change.
pub trait HasKey {
    /// The stable identity type.
    type Key: Eq + Hash + Clone;

    /// The element's identity.
    fn key(&self) -> Self::Key;
}

/// A key → current-slot map fed by move notifications.
///
/// Works with any element type implementing [`HasKey`]. Lookups and updates
/// are O(1) expected; the per-relocation cost of a watched operation becomes
/// one hash-map insert.
///
/// Note that a popped element is tracked at its landing slot (`len - 1`,
/// outside the shrunken heap) until the caller calls [`forget`].
///
/// [`forget`]: PositionTracker::forget
#[derive(Debug, Clone)]
pub struct PositionTracker<K> {
    slots: FxHashMap<K, usize>,
}

impl<K> Default for PositionTracker<K> {
    fn default() -> Self {
        PositionTracker {
            slots: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash + Clone> PositionTracker<K> {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        PositionTracker {
            slots: FxHashMap::default(),
        }
    }

    /// The slot the keyed element was last seen in.
    pub fn slot_of(&self, key: &K) -> Option<usize> {
        self.slots.get(key).copied()
    }

    /// Stops tracking `key`, returning its last known slot.
    pub fn forget(&mut self, key: &K) -> Option<usize> {
        self.slots.remove(key)
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drops all tracked keys.
    pub fn clear(&mut self) {
        self.slots.clear()
    }
}

impl<T> MoveObserver<T> for PositionTracker<T::Key>
where
    T: HasKey,
{
    #[inline]
    fn moved(&mut self, value: &T, _from: usize, to: usize) {
        self.slots.insert(value.key(), to);
    }
}

/// A `(key, priority)` pair ordered by priority alone.
///
/// Convenience element type for tracked heaps: the key identifies the
/// element for [`PositionTracker`], the priority drives the heap order, and
/// the comparisons deliberately ignore the key so that re-keying an element
/// is just an assignment to [`priority`](Keyed::priority) followed by
/// [`update_heap_watched`](crate::update_heap_watched).
#[derive(Debug, Clone, Copy)]
pub struct Keyed<K, P> {
    /// Stable identity, ignored by comparisons.
    pub key: K,
    /// Heap ordering key.
    pub priority: P,
}

impl<K, P> Keyed<K, P> {
    /// Creates a keyed element.
    pub fn new(key: K, priority: P) -> Self {
        Keyed { key, priority }
    }
}

impl<K, P: PartialEq> PartialEq for Keyed<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl<K, P: Eq> Eq for Keyed<K, P> {}

impl<K, P: PartialOrd> PartialOrd for Keyed<K, P> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.priority.partial_cmp(&other.priority)
    }
}

impl<K, P: Ord> Ord for Keyed<K, P> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority.cmp(&other.priority)
    }
}

impl<K: Eq + Hash + Clone, P> HasKey for Keyed<K, P> {
    type Key = K;

    fn key(&self) -> K {
        self.key.clone()
    }
}
