//! Block-parallel heap construction
//!
//! [`parallel_make_heap`] runs the same bottom-up sift-down sweep as
//! [`make_heap`](crate::make_heap), split into blocks of `block_size`
//! consecutive internal nodes. Blocks are claimed from an atomic counter in
//! decreasing index order — a node can only be sifted once both of its
//! subtrees are heaps, so deeper blocks must complete first — and a
//! [`RollingBarrier`] keeps a worker out of any region a peer is still
//! sifting through.
//!
//! The calling thread claims the final (possibly short) block before
//! spawning, so workers only ever see full blocks, then joins the claim loop
//! as the last participant. Workers never sleep on a kernel primitive; they
//! spin on the barrier with [`std::thread::yield_now`].
//!
//! Worth knowing before reaching for this:
//!
//! - the build is in-place and allocation stays O(threads) (the worker list
//!   and the barrier table);
//! - the sequential and parallel builds produce equally valid heaps but not
//!   necessarily identical arrangements;
//! - there is no parallel push/pop/update — those are inherently serial on
//!   a single heap.
//!
//! # Example
//!
//! ```rust
//! use slice_heap::{is_heap, parallel_make_heap};
//!
//! let mut v: Vec<u64> = (0..10_000).rev().collect();
//! parallel_make_heap(&mut v, 64, 4).unwrap();
//! assert!(is_heap(&v));
//! ```

use std::fmt;
use std::io;
use std::ptr;
use std::sync::atomic::{AtomicIsize, Ordering};
use std::thread;

use crate::barrier::{RollingBarrier, IDLE};
use crate::observer::{MoveObserver, NoopObserver, SharedMoveObserver};
use crate::sift;

/// Failure of a [`parallel_make_heap`] call.
#[derive(Debug)]
pub enum BuildError {
    /// The OS refused to create a worker thread. All workers that did start
    /// have been joined; the slice contents are valid but unspecified.
    WorkerSpawn(io::Error),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::WorkerSpawn(err) => {
                write!(f, "failed to spawn heap-build worker: {err}")
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::WorkerSpawn(err) => Some(err),
        }
    }
}

/// Reorders `a` into a max-heap using up to `max_threads` threads.
///
/// `block_size` is the number of internal nodes a worker claims at a time
/// (values below 1 are treated as 1); `max_threads == 0` means "use the
/// machine's available parallelism, at least 2". The effective thread count
/// never exceeds the number of blocks, and the calling thread is one of the
/// workers, so `max_threads == 1` degenerates to a sequential build.
pub fn parallel_make_heap<T>(
    a: &mut [T],
    block_size: usize,
    max_threads: usize,
) -> Result<(), BuildError>
where
    T: Ord + Send,
{
    parallel_make_heap_by(a, |x, y| x < y, block_size, max_threads)
}

/// [`parallel_make_heap`] under `is_less`.
///
/// The comparator is shared across workers, hence `Fn + Sync`.
pub fn parallel_make_heap_by<T, F>(
    a: &mut [T],
    is_less: F,
    block_size: usize,
    max_threads: usize,
) -> Result<(), BuildError>
where
    T: Send,
    F: Fn(&T, &T) -> bool + Sync,
{
    build(a, &is_less, &NoopObserver, block_size, max_threads)
}

/// Watched variant of [`parallel_make_heap_by`].
///
/// `watcher` is invoked from worker threads, so it is taken by shared
/// reference and must synchronize internally; see
/// [`SharedMoveObserver`]. Relocations within one subtree region are
/// observed in order (the barrier orders the workers that touch it), but
/// relocations in unrelated regions interleave arbitrarily.
pub fn parallel_make_heap_by_watched<T, F, M>(
    a: &mut [T],
    is_less: F,
    watcher: &M,
    block_size: usize,
    max_threads: usize,
) -> Result<(), BuildError>
where
    T: Send,
    F: Fn(&T, &T) -> bool + Sync,
    M: SharedMoveObserver<T> + Sync,
{
    build(a, &is_less, watcher, block_size, max_threads)
}

/// Pointer-and-length view of the slice that workers share.
///
/// Safety: workers reconstruct `&mut [T]` views from this concurrently. The
/// claim counter hands out blocks in decreasing index order and the rolling
/// barrier delays a worker until no peer can still write inside the subtree
/// region its block is about to sift through, so concurrently live workers
/// always touch disjoint slot sets and every cross-worker write is ordered
/// by a release/acquire pair on the barrier.
struct SharedSlice<T> {
    ptr: *mut T,
    len: usize,
}

unsafe impl<T: Send> Send for SharedSlice<T> {}
unsafe impl<T: Send> Sync for SharedSlice<T> {}

impl<T> SharedSlice<T> {
    /// Safety: see the type-level contract; callers must hold the block
    /// claim that makes their slot set disjoint from every live peer's.
    #[allow(clippy::mut_from_ref)]
    unsafe fn slice(&self) -> &mut [T] {
        std::slice::from_raw_parts_mut(self.ptr, self.len)
    }
}

/// Everything a worker needs, borrowed for the duration of the scope.
struct BuildContext<'a, T, F, M> {
    data: SharedSlice<T>,
    len: usize,
    block_size: usize,
    remaining: AtomicIsize,
    barrier: RollingBarrier,
    is_less: &'a F,
    watcher: &'a M,
}

fn build<T, F, M>(
    a: &mut [T],
    is_less: &F,
    watcher: &M,
    block_size: usize,
    max_threads: usize,
) -> Result<(), BuildError>
where
    T: Send,
    F: Fn(&T, &T) -> bool + Sync,
    M: SharedMoveObserver<T> + Sync,
{
    let len = a.len();
    let internal = len / 2;
    if internal == 0 {
        return Ok(());
    }

    let block_size = block_size.max(1);
    let nblocks = (internal + block_size - 1) / block_size;

    let max_threads = if max_threads == 0 {
        thread::available_parallelism().map_or(2, |n| n.get().max(2))
    } else {
        max_threads
    };
    let nthreads = nblocks.min(max_threads).max(1);

    let ctx = BuildContext {
        data: SharedSlice {
            ptr: a.as_mut_ptr(),
            len,
        },
        len,
        block_size,
        remaining: AtomicIsize::new(nblocks as isize),
        barrier: RollingBarrier::new(nthreads),
        is_less,
        watcher,
    };

    // The calling thread is the last worker. It claims the final block up
    // front: that block may be shorter than block_size, and it is the
    // deepest one, so nothing needs to be awaited before it runs.
    let lead = nthreads - 1;
    let first_block = (ctx.remaining.fetch_sub(1, Ordering::AcqRel) - 1) as usize;
    debug_assert_eq!(first_block, nblocks - 1);
    let block_front = first_block * block_size;
    let block_len = internal - block_front;

    let mut spawn_error = None;
    thread::scope(|scope| {
        for worker in 0..lead {
            let ctx = &ctx;
            let spawned = thread::Builder::new()
                .name(format!("heap-build-{worker}"))
                .spawn_scoped(scope, move || worker_loop(ctx, worker));
            if let Err(err) = spawned {
                // Workers that never start must not keep peers spinning on
                // their untouched barrier slots.
                for missing in worker..lead {
                    ctx.barrier.set(missing, IDLE);
                }
                spawn_error = Some(err);
                break;
            }
        }

        // Safety: this thread holds the claim on the deepest block, and no
        // other block can enter its region until IDLE is published below.
        unsafe {
            down_block(&ctx, block_front, block_len);
        }
        ctx.barrier.set(lead, IDLE);

        worker_loop(&ctx, lead);
    });

    match spawn_error {
        Some(err) => Err(BuildError::WorkerSpawn(err)),
        None => Ok(()),
    }
}

/// Claims and processes blocks until the counter drains.
fn worker_loop<T, F, M>(ctx: &BuildContext<'_, T, F, M>, worker: usize)
where
    F: Fn(&T, &T) -> bool,
    M: SharedMoveObserver<T>,
{
    loop {
        let claimed = ctx.remaining.fetch_sub(1, Ordering::AcqRel) - 1;
        if claimed < 0 {
            ctx.barrier.set(worker, IDLE);
            return;
        }
        let block_front = claimed as usize * ctx.block_size;
        let first_child = 2 * block_front + 1;

        // Publish how deep this block reaches before waiting, so peers
        // entering shallower blocks hold back in turn.
        let frontier = ctx.len as isize - block_front as isize - ctx.block_size as isize;
        ctx.barrier.set(worker, frontier);

        // Anyone still at or below the first slot this block can touch must
        // finish before the sift may read its subtrees.
        let wait_for = ctx.len as isize - first_child as isize - 1;
        while !ctx.barrier.poll(worker, wait_for) {
            thread::yield_now();
        }

        // Safety: the poll above just cleared every peer out of
        // [first_child, len), and the claim order keeps later claimants
        // shallower than this block.
        unsafe {
            down_block(ctx, block_front, ctx.block_size);
        }
        ctx.barrier.set(worker, IDLE);
    }
}

/// Sifts down every node of one block, highest index first.
///
/// Safety: the caller must hold the claim making `[block_front,
/// block_front + count)` and the subtrees below it exclusive to this
/// worker.
unsafe fn down_block<T, F, M>(ctx: &BuildContext<'_, T, F, M>, block_front: usize, count: usize)
where
    F: Fn(&T, &T) -> bool,
    M: SharedMoveObserver<T>,
{
    let a = ctx.data.slice();
    let mut is_less = |x: &T, y: &T| (ctx.is_less)(x, y);
    let mut watcher = ShareAdapter(ctx.watcher);
    for parent in (block_front..block_front + count).rev() {
        let value = ptr::read(a.as_ptr().add(parent));
        sift::sift_down(a, ctx.len, parent, value, parent, &mut is_less, &mut watcher);
    }
}

/// Bridges the sift primitives' `&mut` observer to the shared observer.
struct ShareAdapter<'a, M>(&'a M);

impl<T, M> MoveObserver<T> for ShareAdapter<'_, M>
where
    M: SharedMoveObserver<T>,
{
    #[inline]
    fn moved(&mut self, value: &T, from: usize, to: usize) {
        self.0.moved(value, from, to)
    }
}
