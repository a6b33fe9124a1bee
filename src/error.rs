//! Failure taxonomy for a harness run.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a run. Every variant is fatal: the harness never
/// proceeds with unsynchronized workers.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The mutual-exclusion primitive could not be created. Reported before
    /// any worker starts.
    #[error("lock initialization failed: {reason}")]
    LockInit { reason: String },

    #[error("failed to spawn {name}: {source}")]
    WorkerSpawn {
        name: String,
        #[source]
        source: io::Error,
    },

    /// A joined worker panicked. The workers' own operations are infallible,
    /// so this indicates a bug in the routine itself.
    #[error("{name} panicked before completing its run")]
    WorkerPanicked { name: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl HarnessError {
    pub fn lock_init(reason: impl Into<String>) -> Self {
        HarnessError::LockInit {
            reason: reason.into(),
        }
    }
}
