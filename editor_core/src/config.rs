//! Engine settings.

use serde::Deserialize;
use thiserror::Error;

use crate::store::DEFAULT_MIN_CAPACITY;

/// Distance in bytes below which cursor positioning scans linearly instead of
/// consulting the line index.
pub const DEFAULT_STEP_SCAN_THRESHOLD: usize = 30;

/// Number of closed buffers kept for reuse.
pub const DEFAULT_POOL_LIMIT: usize = 16;

/// Errors produced while reading engine settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid engine config: {field} must be greater than zero")]
    Invalid { field: &'static str },
}

/// Tunables shared by every buffer a manager creates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Jumps shorter than this many bytes are resolved by scanning.
    pub step_scan_threshold: usize,
    /// Capacity reserved by a store on its first growth.
    pub min_capacity: usize,
    /// Maximum number of closed buffers kept in the reuse pool.
    pub pool_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_scan_threshold: DEFAULT_STEP_SCAN_THRESHOLD,
            min_capacity: DEFAULT_MIN_CAPACITY,
            pool_limit: DEFAULT_POOL_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Parses settings from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that all settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_scan_threshold == 0 {
            return Err(ConfigError::Invalid {
                field: "step_scan_threshold",
            });
        }
        if self.min_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "min_capacity",
            });
        }
        Ok(())
    }
}
