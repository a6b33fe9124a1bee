//! The shared counter and the lock that guards it, owned as one value.
//!
//! The counter is never a global: the harness creates a [`CounterCell`] per
//! run and hands each worker a shared reference, so runs coexist and unit
//! tests stay isolated.

use std::sync::{Mutex, MutexGuard};

use crate::error::HarnessError;

/// A signed counter serialized by exactly one exclusive lock.
#[derive(Debug)]
pub struct CounterCell {
    inner: Mutex<i64>,
}

impl CounterCell {
    pub fn new() -> Self {
        CounterCell {
            inner: Mutex::new(0),
        }
    }

    /// Acquire the lock, blocking until it is available.
    ///
    /// Recovers from a poisoned lock: a counter left behind by a panicked
    /// holder is still a valid integer, so the guard is handed out anyway.
    pub fn lock(&self) -> MutexGuard<'_, i64> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("counter lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Current value. Blocks if a worker is mid-loop.
    pub fn value(&self) -> i64 {
        *self.lock()
    }
}

impl Default for CounterCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Construction seam for the lock. A factory failure is fatal: the harness
/// reports it and starts no workers.
pub trait LockFactory {
    fn create(&self) -> Result<CounterCell, HarnessError>;
}

/// Factory backed by `std::sync::Mutex`, which cannot fail to initialize.
#[derive(Debug, Default)]
pub struct StdLockFactory;

impl LockFactory for StdLockFactory {
    fn create(&self) -> Result<CounterCell, HarnessError> {
        Ok(CounterCell::new())
    }
}
