//! Shared utilities for the negsync crates.
//!
//! - [`retry`]: exponential backoff policy used by the sync loop
//! - [`time`]: clock abstraction so timers can be driven by tests
//! - `testing` (feature `test-utils`): mock clock and async assertions

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod retry;
pub mod time;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use retry::{BackoffError, BackoffResult, ExponentialBackoff};
pub use time::{Clock, SharedClock, SystemClock, Timer};
