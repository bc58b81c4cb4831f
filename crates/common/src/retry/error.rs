// Error types for retry module
use thiserror::Error;

/// Errors reported by the backoff policy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackoffError {
    /// Every allowed retry has been handed out since the last reset
    #[error("maximum retries exceeded ({max_retries})")]
    RetriesExceeded { max_retries: u32 },

    #[error("Invalid backoff configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for backoff operations
pub type BackoffResult<T> = Result<T, BackoffError>;
