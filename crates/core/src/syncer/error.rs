//! Syncer error types

use std::time::Duration;

use negsync_common::BackoffError;
use negsync_domain::{NegSyncError, NegSyncerKey};
use thiserror::Error;

/// Syncer-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncerError {
    /// `start` called while the loop is running
    #[error("NEG syncer for {key} is already running")]
    AlreadyRunning { key: NegSyncerKey },

    /// `start` called before a previous stop has completed
    #[error("NEG syncer for {key} is shutting down")]
    ShuttingDown { key: NegSyncerKey },

    /// `start` called outside a tokio runtime
    #[error("No tokio runtime available to spawn the sync loop")]
    RuntimeUnavailable,

    #[error("Invalid syncer configuration: {0}")]
    InvalidConfig(String),

    /// Operation timed out
    #[error("Operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Task join failed
    #[error("Sync loop task failed: {0}")]
    TaskJoinFailed(String),
}

impl From<BackoffError> for SyncerError {
    fn from(err: BackoffError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

impl From<SyncerError> for NegSyncError {
    fn from(err: SyncerError) -> Self {
        match err {
            SyncerError::AlreadyRunning { .. } | SyncerError::ShuttingDown { .. } => {
                Self::InvalidInput(err.to_string())
            }
            SyncerError::InvalidConfig(_) => Self::Config(err.to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }
}

/// Convenience type alias for syncer operations
pub type SyncerResult<T> = Result<T, SyncerError>;
