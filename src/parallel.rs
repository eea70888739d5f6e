//! The "cancellable parallel search" pattern shared by prime generation, Pollard's
//! rho, and both brute-force attackers.
//!
//! Every parallel operation in this crate looks the same: spawn some number of
//! workers, each repeatedly stepping its own local state until it produces a
//! result, observes another worker's result, or exhausts its share of the search
//! space. Exactly one worker's result is published, guarded by a single atomic
//! compare-and-swap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// The outcome of one step of a worker's search loop.
pub enum StepOutcome<R> {
    /// Nothing found yet; call the step function again.
    Continue,
    /// This worker found a result; publish it and stop every worker.
    Found(R),
    /// This worker's share of the search space is exhausted.
    Exhausted,
}

/// Resolves a worker-count override: `0` means "use hardware concurrency".
pub fn resolve_worker_count(requested: usize) -> usize {
    if requested != 0 {
        requested
    } else {
        std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1)
    }
}

/// Spawns `workers` threads, each owning a private state `S` produced by `init`,
/// and repeatedly calling `step` on it until one worker reports [`StepOutcome::Found`].
///
/// Returns `None` if every worker reports [`StepOutcome::Exhausted`] without anyone
/// finding a result. Workers observe the shared stop flag at the top of every
/// iteration, so cancellation latency is one step's worth of work.
pub fn parallel_search<S, R, Init, Step>(workers: usize, mut init: Init, step: Step) -> Option<R>
where
    S: Send,
    R: Send,
    Init: FnMut(usize) -> S,
    Step: Fn(&mut S, usize, &AtomicBool) -> StepOutcome<R> + Sync,
{
    let workers = resolve_worker_count(workers);
    let found = AtomicBool::new(false);
    let result: Mutex<Option<R>> = Mutex::new(None);
    let states: Vec<S> = (0..workers).map(&mut init).collect();

    std::thread::scope(|scope| {
        for (worker_id, mut state) in states.into_iter().enumerate() {
            let found = &found;
            let result = &result;
            let step = &step;

            scope.spawn(move || loop {
                if found.load(Ordering::SeqCst) {
                    return;
                }

                match step(&mut state, worker_id, found) {
                    StepOutcome::Continue => continue,
                    StepOutcome::Found(value) => {
                        if !found.swap(true, Ordering::SeqCst) {
                            *result.lock().unwrap() = Some(value);
                        }
                        return;
                    }
                    StepOutcome::Exhausted => return,
                }
            });
        }
    });

    result.into_inner().unwrap()
}
