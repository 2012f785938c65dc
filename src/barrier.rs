//! Rolling progress barrier for the parallel build
//!
//! A fixed table of per-worker frontier counters. Each worker owns one slot
//! and publishes how far toward the end of the array its current block may
//! reach (`set`); before touching a region, a worker checks that no peer is
//! still working at or below that region (`poll`). The barrier never blocks:
//! `poll` is a single pass over the table and callers spin (yielding) until
//! it succeeds.
//!
//! A slot value is a distance measured from the end of the array to the end
//! of the owner's block, so *smaller* values mean the owner writes *deeper*
//! slots. The sentinel [`IDLE`] (`-1`) means "between blocks or finished —
//! do not wait for me". Slots start at `0`, the most conservative live
//! value: a worker that has not yet published anything (or was never
//! spawned) holds back every peer until its slot is resolved.

use std::sync::atomic::{AtomicIsize, Ordering};

/// Published by a worker that is between blocks or done for good; peers
/// never wait on it.
pub const IDLE: isize = -1;

/// Single-writer, multi-reader progress board.
///
/// Slot `i` is written only by worker `i` and read by everyone. Stores are
/// release and loads acquire, so when [`poll`](RollingBarrier::poll)
/// succeeds, every write a peer performed before its last
/// [`set`](RollingBarrier::set) is visible to the caller.
#[derive(Debug)]
pub struct RollingBarrier {
    slots: Box<[AtomicIsize]>,
}

impl RollingBarrier {
    /// Creates a barrier for `workers` participants, all slots at `0`
    /// ("not started, assume anything").
    pub fn new(workers: usize) -> Self {
        let slots = (0..workers).map(|_| AtomicIsize::new(0)).collect();
        RollingBarrier { slots }
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the barrier has no participants.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Publishes `frontier` for `worker`. Only the owning worker may call
    /// this on its slot.
    #[inline]
    pub fn set(&self, worker: usize, frontier: isize) {
        self.slots[worker].store(frontier, Ordering::Release);
    }

    /// Whether every peer of `worker` has cleared out of the region at or
    /// below `threshold`.
    ///
    /// Returns `true` iff every other slot is [`IDLE`] or strictly above
    /// `threshold`. A peer whose frontier is at or below the threshold may
    /// still be writing slots the caller is about to visit and must be
    /// awaited.
    #[inline]
    pub fn poll(&self, worker: usize, threshold: isize) -> bool {
        self.slots.iter().enumerate().all(|(i, slot)| {
            if i == worker {
                return true;
            }
            let v = slot.load(Ordering::Acquire);
            v == IDLE || v > threshold
        })
    }
}
