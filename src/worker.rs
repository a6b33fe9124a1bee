//! Worker roles and the single worker routine.
//!
//! Both workers run the same routine; the only difference between them is
//! the tagged [`Role`] they are handed. Keeping one routine keeps the
//! critical-section logic in one place.

use serde::{Deserialize, Serialize};

use crate::cell::CounterCell;
use crate::trace::{TraceKind, TraceSink};

/// One progress line is logged per this many loop steps.
const PROGRESS_STRIDE: u64 = 1_000_000;

/// Direction a worker adjusts the shared counter in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Increment,
    Decrement,
}

impl Role {
    /// Per-step adjustment applied inside the loop.
    pub fn delta(self) -> i64 {
        match self {
            Role::Increment => 1,
            Role::Decrement => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Increment => "increment",
            Role::Decrement => "decrement",
        }
    }
}

/// Name given to the spawned thread, so the worker shows up in panic
/// messages and profilers under its role.
pub fn thread_name(index: usize, role: Role) -> String {
    format!("worker-{index}-{}", role.label())
}

/// The worker body: one unconditional +1, then `iterations` steps in the
/// role's direction, all under a single lock acquisition.
///
/// The guard is held across the whole loop. The other worker blocks until
/// this one releases, so the counter is never observable mid-loop.
pub fn run_worker(
    index: usize,
    role: Role,
    cell: &CounterCell,
    iterations: u64,
    trace: &TraceSink,
) {
    trace.record(index, TraceKind::Started);
    log::debug!("worker {index} ({}) started", role.label());

    trace.record(index, TraceKind::WaitingForLock);
    let mut guard = cell.lock();
    trace.record(index, TraceKind::EnteredCriticalSection);
    log::debug!(
        "worker {index} ({}) acquired the lock, counter = {}",
        role.label(),
        *guard
    );

    *guard += 1;
    let delta = role.delta();
    for step in 1..=iterations {
        *guard += delta;
        if step % PROGRESS_STRIDE == 0 {
            log::trace!(
                "worker {index} ({}): {step}/{iterations} steps",
                role.label()
            );
        }
    }

    log::debug!(
        "worker {index} ({}) finished its loop, counter = {}",
        role.label(),
        *guard
    );
    drop(guard);
    trace.record(index, TraceKind::ReleasedLock);
    trace.record(index, TraceKind::Terminated);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace;
    use std::time::Instant;

    #[test]
    fn test_role_deltas() {
        assert_eq!(Role::Increment.delta(), 1);
        assert_eq!(Role::Decrement.delta(), -1);
    }

    #[test]
    fn test_thread_name_includes_role() {
        assert_eq!(thread_name(0, Role::Increment), "worker-0-increment");
        assert_eq!(thread_name(1, Role::Decrement), "worker-1-decrement");
    }

    #[test]
    fn test_increment_worker_arithmetic() {
        let cell = CounterCell::new();
        let (sink, _collector) = trace::trace_channel(Instant::now());
        run_worker(0, Role::Increment, &cell, 10, &sink);
        assert_eq!(cell.value(), 11);
    }

    #[test]
    fn test_decrement_worker_arithmetic() {
        let cell = CounterCell::new();
        let (sink, _collector) = trace::trace_channel(Instant::now());
        run_worker(0, Role::Decrement, &cell, 10, &sink);
        assert_eq!(cell.value(), -9);
    }

    #[test]
    fn test_zero_iterations_still_bumps_once() {
        let cell = CounterCell::new();
        let (sink, _collector) = trace::trace_channel(Instant::now());
        run_worker(0, Role::Decrement, &cell, 0, &sink);
        assert_eq!(cell.value(), 1);
    }

    #[test]
    fn test_worker_emits_lifecycle_in_order() {
        let cell = CounterCell::new();
        let (sink, collector) = trace::trace_channel(Instant::now());
        run_worker(3, Role::Increment, &cell, 1, &sink);
        drop(sink);

        let kinds: Vec<TraceKind> = collector.drain().into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TraceKind::Started,
                TraceKind::WaitingForLock,
                TraceKind::EnteredCriticalSection,
                TraceKind::ReleasedLock,
                TraceKind::Terminated,
            ]
        );
    }
}
