// Exponential backoff policy for the sync loop
use std::time::Duration;

use crate::retry::constants::{BACKOFF_MULTIPLIER, MAX_BACKOFF_EXPONENT};
use crate::retry::error::{BackoffError, BackoffResult};

/// Exponential backoff with a bounded number of retries.
///
/// The n-th consecutive call to [`next_retry_delay`](Self::next_retry_delay)
/// yields `min_delay * 2^(n-1)`, clamped to `max_delay`. Once `max_retries`
/// delays have been handed out, further calls report
/// [`BackoffError::RetriesExceeded`] until [`reset_retry_delay`] is called.
///
/// Mutation takes `&mut self`: a policy belongs to exactly one loop and is
/// never shared between syncers.
///
/// [`reset_retry_delay`]: Self::reset_retry_delay
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    max_retries: u32,
    min_delay: Duration,
    max_delay: Duration,
    attempts: u32,
}

impl ExponentialBackoff {
    /// Create a backoff policy with validation
    ///
    /// # Errors
    /// Returns [`BackoffError::InvalidConfig`] if `min_delay` is zero or
    /// greater than `max_delay`.
    pub fn new(max_retries: u32, min_delay: Duration, max_delay: Duration) -> BackoffResult<Self> {
        if min_delay.is_zero() {
            return Err(BackoffError::InvalidConfig("min_delay must be greater than 0".into()));
        }

        if min_delay > max_delay {
            return Err(BackoffError::InvalidConfig(format!(
                "min_delay ({min_delay:?}) cannot be greater than max_delay ({max_delay:?})"
            )));
        }

        Ok(Self { max_retries, min_delay, max_delay, attempts: 0 })
    }

    /// Delay before the next retry, advancing the attempt counter
    ///
    /// # Errors
    /// Returns [`BackoffError::RetriesExceeded`] once `max_retries` delays
    /// have been returned since construction or the last reset. The counter
    /// is left unchanged in that case.
    pub fn next_retry_delay(&mut self) -> BackoffResult<Duration> {
        if self.attempts >= self.max_retries {
            return Err(BackoffError::RetriesExceeded { max_retries: self.max_retries });
        }

        let delay = self.delay_for(self.attempts);
        self.attempts += 1;
        Ok(delay)
    }

    /// Start the schedule over from the minimum delay
    pub fn reset_retry_delay(&mut self) {
        self.attempts = 0;
    }

    /// Number of delays handed out since the last reset
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(MAX_BACKOFF_EXPONENT);
        let multiplier = BACKOFF_MULTIPLIER.saturating_pow(exponent);
        let multiplier = u32::try_from(multiplier).unwrap_or(u32::MAX);

        self.min_delay.saturating_mul(multiplier).min(self.max_delay)
    }
}
