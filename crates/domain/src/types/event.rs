//! Event vocabulary for sync failures

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Severity of a recorded event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Normal,
    Warning,
}

impl_domain_status_conversions!(EventType {
    Normal => "Normal",
    Warning => "Warning",
});

/// Whether the syncer will retry a failed sync on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryDisposition {
    /// A retry timer is armed
    WillRetry,
    /// Retries are exhausted; only an external sync signal will try again
    WillNotRetry,
}

impl RetryDisposition {
    pub fn will_retry(self) -> bool {
        matches!(self, Self::WillRetry)
    }
}

impl_domain_status_conversions!(RetryDisposition {
    WillRetry => "(will retry)",
    WillNotRetry => "(will not retry)",
});
