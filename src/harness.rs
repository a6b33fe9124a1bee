//! Orchestration: create the lock, start both workers, join, report.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::cell::{LockFactory, StdLockFactory};
use crate::config::RaceConfig;
use crate::error::HarnessError;
use crate::report::RaceReport;
use crate::trace;
use crate::worker;

/// Runs the two-worker counter race described by a [`RaceConfig`].
pub struct RaceHarness {
    config: RaceConfig,
}

impl RaceHarness {
    pub fn new(config: RaceConfig) -> Self {
        RaceHarness { config }
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// Run with the standard lock.
    pub fn run(&self) -> Result<RaceReport, HarnessError> {
        self.run_with(&StdLockFactory)
    }

    /// Run with a caller-supplied lock factory.
    ///
    /// The lock is created before either worker is spawned; a factory
    /// failure returns immediately with zero workers started.
    pub fn run_with<F: LockFactory>(&self, factory: &F) -> Result<RaceReport, HarnessError> {
        let started = Instant::now();
        let cell = Arc::new(factory.create()?);
        let (sink, collector) = trace::trace_channel(started);

        let iterations = self.config.iterations;
        let roles = self.config.roles.roles();
        log::info!(
            "starting {} workers ({}), {} iterations each",
            roles.len(),
            self.config.roles,
            iterations
        );

        let mut handles = Vec::with_capacity(roles.len());
        for (index, role) in roles.into_iter().enumerate() {
            let cell = Arc::clone(&cell);
            let sink = sink.clone();
            let name = worker::thread_name(index, role);
            let spawned = thread::Builder::new()
                .name(name.clone())
                .spawn(move || worker::run_worker(index, role, &cell, iterations, &sink));
            match spawned {
                Ok(handle) => handles.push((index, role, handle)),
                Err(source) => {
                    // Wait out anything already running before reporting.
                    for (_, _, handle) in handles {
                        let _ = handle.join();
                    }
                    return Err(HarnessError::WorkerSpawn { name, source });
                }
            }
        }
        drop(sink);

        let mut panicked = None;
        for (index, role, handle) in handles {
            if handle.join().is_err() {
                log::error!("worker {index} ({}) panicked", role.label());
                panicked.get_or_insert_with(|| worker::thread_name(index, role));
            } else {
                log::debug!("worker {index} ({}) joined", role.label());
            }
        }
        if let Some(name) = panicked {
            return Err(HarnessError::WorkerPanicked { name });
        }

        let events = collector.drain();
        let final_value = cell.value();
        log::info!("run finished, final counter value {final_value}");
        Ok(RaceReport::new(
            &self.config,
            final_value,
            events,
            started.elapsed(),
        ))
    }
}
