//! Syncer lifecycle and public API
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use negsync_core::{EventRecorder, ServiceLister, Syncer};
//! use negsync_domain::{Config, NegSyncerKey};
//!
//! # async fn example(
//! #     lister: Arc<dyn ServiceLister>,
//! #     recorder: Arc<dyn EventRecorder>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let key = NegSyncerKey::new("default", "web", 80, "8080");
//! let syncer = Syncer::new(key, "k8s1-neg-web-80", lister, recorder, &Config::default())?
//!     .with_sync_handler(|| async { anyhow::Ok(()) });
//!
//! syncer.start()?;
//! syncer.sync();
//! // ... endpoints change, call sync() again ...
//! syncer.stop_and_wait().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use negsync_common::{ExponentialBackoff, SharedClock, SystemClock};
use negsync_domain::{Config, NegSyncerKey};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, trace, warn};

use crate::syncer::error::{SyncerError, SyncerResult};
use crate::syncer::ports::{EventRecorder, ServiceLister, SharedSyncHandler, SyncHandler};
use crate::syncer::state::{LoopState, SyncerPhase, SyncerShared};
use crate::syncer::sync_loop::{self, FailureReporter, SyncLoopContext};

const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// NEG syncer: lifecycle state machine plus its background sync loop.
///
/// All methods take `&self` and may be called concurrently; share the
/// syncer behind an `Arc`. Only `stop_and_wait` suspends.
pub struct Syncer {
    key: NegSyncerKey,
    shared: Arc<Mutex<SyncerShared>>,
    reporter: Arc<FailureReporter>,
    clock: SharedClock,
    backoff: ExponentialBackoff,
    retry_attempts: Arc<AtomicU32>,
    stop_timeout: Duration,
}

impl Syncer {
    /// Create an idle syncer whose sync handler does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SyncerError::InvalidConfig`] if the backoff settings are
    /// invalid.
    pub fn new(
        key: NegSyncerKey,
        neg_name: impl Into<String>,
        service_lister: Arc<dyn ServiceLister>,
        recorder: Arc<dyn EventRecorder>,
        config: &Config,
    ) -> SyncerResult<Self> {
        config.syncer.validate().map_err(|e| SyncerError::InvalidConfig(e.to_string()))?;
        let backoff = ExponentialBackoff::new(
            config.backoff.max_retries,
            config.backoff.min_retry_delay(),
            config.backoff.max_retry_delay(),
        )?;

        let noop: SharedSyncHandler = Arc::new(|| async { anyhow::Ok(()) });
        let reporter = Arc::new(FailureReporter {
            key: key.clone(),
            neg_name: neg_name.into(),
            service_lister,
            recorder,
        });

        Ok(Self {
            key,
            shared: Arc::new(Mutex::new(SyncerShared::new(noop))),
            reporter,
            clock: Arc::new(SystemClock),
            backoff,
            retry_attempts: Arc::new(AtomicU32::new(0)),
            stop_timeout: config.syncer.stop_timeout(),
        })
    }

    /// Replace the clock used for retry timers
    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_sync_handler(self, handler: impl SyncHandler + 'static) -> Self {
        self.set_sync_handler(handler);
        self
    }

    /// Replace the sync operation.
    ///
    /// Safe while running: the loop picks up the new handler on its next
    /// iteration, never for a call already in flight.
    pub fn set_sync_handler(&self, handler: impl SyncHandler + 'static) {
        let handler: SharedSyncHandler = Arc::new(handler);
        let mut shared = self.shared.lock();
        if matches!(shared.state, LoopState::Running { .. }) {
            debug!(key = %self.key, "Sync handler replaced while running");
        }
        shared.handler = handler;
    }

    /// Start the background sync loop.
    ///
    /// The loop syncs once immediately, then on every signal or retry.
    ///
    /// # Errors
    ///
    /// - [`SyncerError::AlreadyRunning`] if the loop is running
    /// - [`SyncerError::ShuttingDown`] if a stop has not completed yet
    /// - [`SyncerError::RuntimeUnavailable`] outside a tokio runtime
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn start(&self) -> SyncerResult<()> {
        let mut shared = self.shared.lock();
        match shared.state {
            LoopState::Running { .. } => {
                return Err(SyncerError::AlreadyRunning { key: self.key.clone() })
            }
            LoopState::Stopping => {
                return Err(SyncerError::ShuttingDown { key: self.key.clone() })
            }
            LoopState::Idle => {}
        }
        let runtime = Handle::try_current().map_err(|_| SyncerError::RuntimeUnavailable)?;

        info!(
            neg = %self.reporter.neg_name,
            max_retries = self.backoff.max_retries(),
            min_retry_delay = ?self.backoff.min_delay(),
            max_retry_delay = ?self.backoff.max_delay(),
            "Starting NEG syncer"
        );

        let (signals, receiver) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        self.retry_attempts.store(0, Ordering::SeqCst);

        let context = SyncLoopContext {
            shared: Arc::clone(&self.shared),
            reporter: Arc::clone(&self.reporter),
            clock: Arc::clone(&self.clock),
            backoff: self.backoff.clone(),
            retry_attempts: Arc::clone(&self.retry_attempts),
        };
        let handle = runtime.spawn(sync_loop::run(context, receiver, cancel.clone()));

        shared.state = LoopState::Running { signals, cancel };
        shared.task = Some(handle);
        Ok(())
    }

    /// Request the loop to stop. No-op unless running.
    ///
    /// Returns immediately; an in-flight sync call finishes first and the
    /// syncer reads as shutting down until the loop has exited.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn stop(&self) {
        let mut shared = self.shared.lock();
        let LoopState::Running { cancel, .. } = &shared.state else {
            trace!(phase = %shared.state.phase(), "Stop ignored; syncer not running");
            return;
        };

        info!("Stopping NEG syncer");
        cancel.cancel();
        // Dropping the Running state closes the signal channel
        shared.state = LoopState::Stopping;
    }

    /// Stop and wait for the loop to exit, bounded by the configured stop
    /// timeout.
    ///
    /// Safe to call again after a timeout, and from several callers at once:
    /// every call waits for the same loop.
    ///
    /// # Errors
    ///
    /// - [`SyncerError::Timeout`] if the loop is still busy after the timeout
    /// - [`SyncerError::TaskJoinFailed`] if the loop task panicked
    pub async fn stop_and_wait(&self) -> SyncerResult<()> {
        self.stop();
        let timeout = self.stop_timeout;

        let task = self.shared.lock().task.take();
        let Some(mut task) = task else {
            // Another caller holds the handle; the exit guard still reports Idle
            return tokio::time::timeout(timeout, self.wait_until_idle())
                .await
                .map_err(|_| SyncerError::Timeout { duration: timeout });
        };

        match tokio::time::timeout(timeout, &mut task).await {
            Ok(joined) => joined.map_err(|e| SyncerError::TaskJoinFailed(e.to_string())),
            Err(_) => {
                let mut shared = self.shared.lock();
                if shared.task.is_none() {
                    shared.task = Some(task);
                }
                Err(SyncerError::Timeout { duration: timeout })
            }
        }
    }

    async fn wait_until_idle(&self) {
        while self.phase() != SyncerPhase::Idle {
            tokio::time::sleep(IDLE_POLL_INTERVAL).await;
        }
    }

    /// Request a sync.
    ///
    /// Returns `true` if a signal was queued, `false` if one was already
    /// pending or the syncer is not running. Never blocks.
    pub fn sync(&self) -> bool {
        let shared = self.shared.lock();
        let LoopState::Running { signals, .. } = &shared.state else {
            warn!(key = %self.key, "NEG syncer is already stopped");
            return false;
        };

        match signals.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) => {
                trace!(key = %self.key, "Sync already pending");
                false
            }
            Err(TrySendError::Closed(())) => false,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.phase().is_stopped()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.phase().is_shutting_down()
    }

    pub fn phase(&self) -> SyncerPhase {
        self.shared.lock().state.phase()
    }

    /// Consecutive failed syncs the current schedule has retried, as of the
    /// loop's last iteration
    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts.load(Ordering::SeqCst)
    }

    pub fn key(&self) -> &NegSyncerKey {
        &self.key
    }

    pub fn neg_name(&self) -> &str {
        &self.reporter.neg_name
    }
}

/// Ensure the loop is cancelled when the syncer is dropped
impl Drop for Syncer {
    fn drop(&mut self) {
        let mut shared = self.shared.lock();
        if let LoopState::Running { cancel, .. } = &shared.state {
            warn!(key = %self.key, "Syncer dropped while running; cancelling");
            cancel.cancel();
            shared.state = LoopState::Stopping;
        }
    }
}
