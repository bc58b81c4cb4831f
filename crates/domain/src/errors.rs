//! Error types used throughout the syncer crates

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for negsync
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum NegSyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for negsync operations
pub type Result<T> = std::result::Result<T, NegSyncError>;
