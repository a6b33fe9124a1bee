//! Two workers racing on one lock-guarded counter.
//!
//! The harness spawns exactly two threads that contend for a single shared
//! integer. Each worker holds the lock across its *entire* adjustment loop,
//! so the two loops never interleave: the run is one worker's whole loop
//! followed by the other's, and only the order is left to the scheduler.
//! With one incrementing and one decrementing worker the final value is
//! always 2; with two incrementing workers it is `2 + 2N`.
//!
//! Run with: cargo run [config.toml]

pub mod cell;
pub mod config;
pub mod error;
pub mod harness;
pub mod report;
pub mod trace;
pub mod worker;

pub use cell::{CounterCell, LockFactory, StdLockFactory};
pub use config::{ConfigError, RaceConfig, RolePair, DEFAULT_ITERATIONS, MAX_ITERATIONS};
pub use error::HarnessError;
pub use harness::RaceHarness;
pub use report::RaceReport;
pub use trace::{TraceEvent, TraceKind};
pub use worker::Role;
