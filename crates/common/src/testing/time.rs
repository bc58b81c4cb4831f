//! Deterministic clock for tests
//!
//! Timers created by [`MockClock::after`] only fire when the test advances
//! the clock past their deadline.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use negsync_common::testing::MockClock;
//! use negsync_common::Clock;
//!
//! let clock = MockClock::new();
//! let start = clock.now();
//! let _timer = clock.after(Duration::from_secs(5));
//! assert_eq!(clock.pending_timers(), 1);
//!
//! clock.advance(Duration::from_secs(5));
//! assert_eq!(clock.now().duration_since(start), Duration::from_secs(5));
//! assert_eq!(clock.pending_timers(), 0);
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::trace;

use crate::time::{Clock, Timer};

#[derive(Debug)]
struct PendingTimer {
    deadline: Duration,
    fire: oneshot::Sender<()>,
}

#[derive(Debug)]
struct MockClockState {
    elapsed: Duration,
    timers: Vec<PendingTimer>,
}

/// Mock clock for deterministic testing
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    state: Arc<Mutex<MockClockState>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            state: Arc::new(Mutex::new(MockClockState {
                elapsed: Duration::ZERO,
                timers: Vec::new(),
            })),
        }
    }

    /// Advance the clock, firing every timer whose deadline has passed
    ///
    /// Timers whose future was dropped are pruned, due or not.
    pub fn advance(&self, duration: Duration) {
        let mut state = self.state.lock();
        state.elapsed += duration;
        let now = state.elapsed;

        state.timers.retain(|timer| !timer.fire.is_closed());
        let (due, pending): (Vec<_>, Vec<_>) =
            state.timers.drain(..).partition(|timer| timer.deadline <= now);
        state.timers = pending;
        drop(state);

        let mut fired = 0usize;
        for timer in due {
            if timer.fire.send(()).is_ok() {
                fired += 1;
            }
        }
        trace!(elapsed = ?now, fired, "advanced mock clock");
    }

    /// Time elapsed since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.state.lock().elapsed
    }

    /// Number of armed timers; timers whose future was dropped are pruned
    pub fn pending_timers(&self) -> usize {
        let mut state = self.state.lock();
        state.timers.retain(|timer| !timer.fire.is_closed());
        state.timers.len()
    }

    /// Deadline of the earliest armed timer, relative to the remaining time
    pub fn next_timer_in(&self) -> Option<Duration> {
        let mut state = self.state.lock();
        state.timers.retain(|timer| !timer.fire.is_closed());
        let now = state.elapsed;
        state.timers.iter().map(|timer| timer.deadline.saturating_sub(now)).min()
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + self.state.lock().elapsed
    }

    fn after(&self, delay: Duration) -> Timer {
        if delay.is_zero() {
            return Box::pin(std::future::ready(()));
        }

        let (fire, fired) = oneshot::channel();
        let mut state = self.state.lock();
        let deadline = state.elapsed + delay;
        state.timers.push(PendingTimer { deadline, fire });

        Box::pin(async move {
            // A clock dropped without firing leaves the timer pending forever
            if fired.await.is_err() {
                std::future::pending::<()>().await;
            }
        })
    }
}
