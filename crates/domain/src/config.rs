//! Configuration structures
//!
//! Every section is `#[serde(default)]`, so a partial file only overrides
//! the fields it names.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LOG_LEVEL, DEFAULT_MAX_RETRIES, DEFAULT_MAX_RETRY_DELAY_MS,
    DEFAULT_MIN_RETRY_DELAY_MS, DEFAULT_STOP_TIMEOUT_MS,
};
use crate::errors::{NegSyncError, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backoff: BackoffConfig,
    pub syncer: SyncerConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Validate every section
    ///
    /// # Errors
    /// Returns `NegSyncError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.backoff.validate()?;
        self.syncer.validate()
    }
}

/// Retry schedule for failed syncs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Consecutive failures that are retried automatically
    pub max_retries: u32,
    pub min_retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            min_retry_delay_ms: DEFAULT_MIN_RETRY_DELAY_MS,
            max_retry_delay_ms: DEFAULT_MAX_RETRY_DELAY_MS,
        }
    }
}

impl BackoffConfig {
    pub fn min_retry_delay(&self) -> Duration {
        Duration::from_millis(self.min_retry_delay_ms)
    }

    pub fn max_retry_delay(&self) -> Duration {
        Duration::from_millis(self.max_retry_delay_ms)
    }

    /// # Errors
    /// Returns `NegSyncError::Config` if the minimum delay is zero or exceeds
    /// the maximum delay.
    pub fn validate(&self) -> Result<()> {
        if self.min_retry_delay_ms == 0 {
            return Err(NegSyncError::Config("min_retry_delay_ms must be greater than 0".into()));
        }
        if self.min_retry_delay_ms > self.max_retry_delay_ms {
            return Err(NegSyncError::Config(format!(
                "min_retry_delay_ms ({}) cannot be greater than max_retry_delay_ms ({})",
                self.min_retry_delay_ms, self.max_retry_delay_ms
            )));
        }
        Ok(())
    }
}

/// Syncer lifecycle settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncerConfig {
    /// Upper bound on waiting for a stopped loop to exit
    pub stop_timeout_ms: u64,
}

impl Default for SyncerConfig {
    fn default() -> Self {
        Self { stop_timeout_ms: DEFAULT_STOP_TIMEOUT_MS }
    }
}

impl SyncerConfig {
    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }

    /// # Errors
    /// Returns `NegSyncError::Config` if the stop timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.stop_timeout_ms == 0 {
            return Err(NegSyncError::Config("stop_timeout_ms must be greater than 0".into()));
        }
        Ok(())
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), json: false }
    }
}
