// Retry module: exponential backoff for failed syncs

pub mod backoff;
pub mod constants;
pub mod error;

pub use backoff::ExponentialBackoff;
pub use error::{BackoffError, BackoffResult};
