//! Testing utilities and helpers
//!
//! - **[`async_utils`]**: async polling and timeout helpers, plus the
//!   `assert_eventually_async!` macro at the crate root
//! - **[`time`]**: [`MockClock`], a manually advanced [`Clock`](crate::Clock)

pub mod async_utils;
pub mod time;

pub use async_utils::poll_until;
pub use time::MockClock;
