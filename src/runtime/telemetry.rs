//! Per-thread evaluation counters.
//!
//! The runtime is single-threaded, so counters are thread-local: tests and
//! benchmarks running on other threads never see each other's numbers.

use std::cell::Cell;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalStats {
    pub thunks_created: usize,
    /// Computations actually run (first force of a pending thunk).
    pub thunks_forced: usize,
    /// Forces answered from a memoized value.
    pub memo_hits: usize,
    pub black_holes: usize,
    pub closures: usize,
    pub exact_calls: usize,
    pub partial_applications: usize,
    pub over_applications: usize,
}

thread_local! {
    static STATS: Cell<EvalStats> = Cell::new(EvalStats::default());
}

fn bump(update: impl FnOnce(&mut EvalStats)) {
    STATS.with(|stats| {
        let mut current = stats.get();
        update(&mut current);
        stats.set(current);
    });
}

pub fn record_thunk_created() {
    bump(|s| s.thunks_created += 1);
}

pub fn record_thunk_forced() {
    bump(|s| s.thunks_forced += 1);
}

pub fn record_memo_hit() {
    bump(|s| s.memo_hits += 1);
}

pub fn record_black_hole() {
    bump(|s| s.black_holes += 1);
}

pub fn record_closure() {
    bump(|s| s.closures += 1);
}

pub fn record_exact_call() {
    bump(|s| s.exact_calls += 1);
}

pub fn record_partial_application() {
    bump(|s| s.partial_applications += 1);
}

pub fn record_over_application() {
    bump(|s| s.over_applications += 1);
}

pub fn snapshot() -> EvalStats {
    STATS.with(Cell::get)
}

pub fn reset() {
    STATS.with(|stats| stats.set(EvalStats::default()));
}
