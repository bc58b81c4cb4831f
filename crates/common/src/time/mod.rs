//! Time abstractions
//!
//! The sync loop never calls `tokio::time` directly; it asks a [`Clock`]
//! for timers so tests can drive retries deterministically with
//! `testing::MockClock`.

pub mod clock;

pub use clock::{never, Clock, SharedClock, SystemClock, Timer};
