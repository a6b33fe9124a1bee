//! Lifecycle instrumentation for the two workers.
//!
//! Workers push [`TraceEvent`]s over a channel while they run; the harness
//! drains them after both have joined. Tracing is diagnostic only, never
//! load-bearing: the counter's value does not depend on it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, Sender};
use serde::Serialize;

/// Worker state transitions, in the order a worker passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TraceKind {
    Started,
    WaitingForLock,
    EnteredCriticalSection,
    ReleasedLock,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    pub worker: usize,
    pub kind: TraceKind,
    /// Offset from the start of the run.
    pub at: Duration,
}

/// Sender half handed to each worker.
#[derive(Clone)]
pub struct TraceSink {
    started: Instant,
    sender: Sender<TraceEvent>,
}

impl TraceSink {
    pub fn record(&self, worker: usize, kind: TraceKind) {
        let event = TraceEvent {
            worker,
            kind,
            at: self.started.elapsed(),
        };
        // A send only fails once the collector is gone; the event then has
        // no audience and is dropped.
        let _ = self.sender.send(event);
    }
}

/// Collector half kept by the harness.
pub struct TraceCollector {
    receiver: Receiver<TraceEvent>,
}

impl TraceCollector {
    /// Everything recorded so far. Call after the workers have joined and
    /// the sinks are dropped.
    pub fn drain(self) -> Vec<TraceEvent> {
        self.receiver.try_iter().collect()
    }
}

pub fn trace_channel(started: Instant) -> (TraceSink, TraceCollector) {
    let (sender, receiver) = channel::unbounded();
    (
        TraceSink { started, sender },
        TraceCollector { receiver },
    )
}

/// One worker's stay inside the critical section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub worker: usize,
    pub entered: Duration,
    pub released: Duration,
}

/// Pair each `EnteredCriticalSection` with the same worker's `ReleasedLock`.
/// Unmatched entries (a worker that never released) produce no span.
pub fn critical_sections(events: &[TraceEvent]) -> Vec<SectionSpan> {
    let mut open: HashMap<usize, Duration> = HashMap::new();
    let mut spans = Vec::new();
    for event in events {
        match event.kind {
            TraceKind::EnteredCriticalSection => {
                open.insert(event.worker, event.at);
            }
            TraceKind::ReleasedLock => {
                if let Some(entered) = open.remove(&event.worker) {
                    spans.push(SectionSpan {
                        worker: event.worker,
                        entered,
                        released: event.at,
                    });
                }
            }
            _ => {}
        }
    }
    spans
}

/// True if any two spans from different workers overlap in time. Touching
/// endpoints do not count as overlap.
pub fn sections_overlap(spans: &[SectionSpan]) -> bool {
    for (i, a) in spans.iter().enumerate() {
        for b in &spans[i + 1..] {
            if a.worker != b.worker && a.entered < b.released && b.entered < a.released {
                return true;
            }
        }
    }
    false
}
