//! Clock trait and the tokio-backed system clock

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::BoxFuture;

/// A future that completes once its delay has elapsed.
///
/// Dropping a `Timer` before it completes disarms it.
pub type Timer = BoxFuture<'static, ()>;

/// Shared, dynamically dispatched clock handle
pub type SharedClock = Arc<dyn Clock>;

/// Trait for time operations to enable testing
pub trait Clock: Send + Sync + 'static {
    /// Get current instant (monotonic time)
    fn now(&self) -> Instant;

    /// A timer that fires after `delay`
    fn after(&self, delay: Duration) -> Timer;
}

/// Real clock backed by the tokio timer wheel
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn after(&self, delay: Duration) -> Timer {
        Box::pin(tokio::time::sleep(delay))
    }
}

impl<T: Clock> Clock for Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn after(&self, delay: Duration) -> Timer {
        (**self).after(delay)
    }
}

/// A timer that never fires
pub fn never() -> Timer {
    Box::pin(std::future::pending())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_system_clock_timer_fires() {
        let clock = SystemClock;
        let start = tokio::time::Instant::now();
        clock.after(Duration::from_secs(30)).await;
        assert!(start.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_does_not_fire() {
        let fired = tokio::time::timeout(Duration::from_secs(3600), never()).await;
        assert!(fired.is_err());
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
