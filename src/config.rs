//! Run configuration: iteration count and role pairing.
//!
//! The demo binary runs fine with the built-in defaults; a TOML or JSON
//! file can override them. Format is picked by file extension.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::worker::Role;

/// Loop bound used by the demo: 2^25 - 1 adjustments per worker.
pub const DEFAULT_ITERATIONS: u64 = 0x1FF_FFFF;

/// Cap keeping the final-value arithmetic comfortably inside `i64`.
pub const MAX_ITERATIONS: u64 = 1 << 40;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("iterations {value} out of range (max: {max})")]
    OutOfRange { value: u64, max: u64 },
}

/// Which directions the two contending workers run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RolePair {
    /// One worker adds, the other subtracts; the loops cancel exactly.
    IncrementDecrement,
    /// Both workers add.
    IncrementIncrement,
}

impl RolePair {
    pub fn roles(self) -> [Role; 2] {
        match self {
            RolePair::IncrementDecrement => [Role::Increment, Role::Decrement],
            RolePair::IncrementIncrement => [Role::Increment, Role::Increment],
        }
    }
}

impl fmt::Display for RolePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b] = self.roles();
        write!(f, "{} + {}", a.label(), b.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RaceConfig {
    /// Directional adjustments per worker, on top of its unconditional +1.
    pub iterations: u64,
    pub roles: RolePair,
}

impl Default for RaceConfig {
    fn default() -> Self {
        RaceConfig {
            iterations: DEFAULT_ITERATIONS,
            roles: RolePair::IncrementDecrement,
        }
    }
}

impl RaceConfig {
    pub fn new(iterations: u64, roles: RolePair) -> Result<Self, ConfigError> {
        let config = RaceConfig { iterations, roles };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations > MAX_ITERATIONS {
            return Err(ConfigError::OutOfRange {
                value: self.iterations,
                max: MAX_ITERATIONS,
            });
        }
        Ok(())
    }

    /// Load from a `.toml` or `.json` file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let config: RaceConfig = match format.as_deref() {
            Some("json") => serde_json::from_str(&content)
                .map_err(|err| ConfigError::Parse(err.to_string()))?,
            _ => toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// The value every run must finish on: each worker contributes its
    /// unconditional +1 plus `iterations` steps in its own direction.
    pub fn expected_final(&self) -> i64 {
        self.roles
            .roles()
            .iter()
            .map(|role| 1 + self.iterations as i64 * role.delta())
            .sum()
    }
}
