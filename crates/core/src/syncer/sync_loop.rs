//! Background sync loop
//!
//! One loop runs per `start`. Each iteration calls the sync handler, then
//! waits for whichever comes first: cancellation, a coalesced sync signal,
//! or the retry timer armed after a failure.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use negsync_common::time::never;
use negsync_common::{ExponentialBackoff, SharedClock};
use negsync_domain::constants::SYNC_FAILED_REASON;
use negsync_domain::{EventType, NegSyncerKey, RetryDisposition};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::syncer::ports::{EventRecorder, ServiceLister, SharedSyncHandler};
use crate::syncer::state::{LoopState, SyncerShared};

/// Reports sync failures as warning events against the owning service
pub(crate) struct FailureReporter {
    pub(crate) key: NegSyncerKey,
    pub(crate) neg_name: String,
    pub(crate) service_lister: Arc<dyn ServiceLister>,
    pub(crate) recorder: Arc<dyn EventRecorder>,
}

impl FailureReporter {
    fn report(&self, disposition: RetryDisposition, err: &anyhow::Error) {
        let subject = self.key.service();
        let Some(service) = self.service_lister.get_service(&subject.namespace, &subject.name)
        else {
            debug!(
                key = %self.key,
                service = %subject,
                "Service not found; sync failure event suppressed"
            );
            return;
        };

        let message = format!("Failed to sync NEG {:?} {disposition}: {err:#}", self.neg_name);
        self.recorder.record_event(&service, EventType::Warning, SYNC_FAILED_REASON, &message);
    }
}

/// Context for the sync loop to avoid too many arguments
pub(crate) struct SyncLoopContext {
    pub(crate) shared: Arc<Mutex<SyncerShared>>,
    pub(crate) reporter: Arc<FailureReporter>,
    pub(crate) clock: SharedClock,
    pub(crate) backoff: ExponentialBackoff,
    pub(crate) retry_attempts: Arc<AtomicU32>,
}

impl SyncLoopContext {
    /// Handler swaps land here, between calls
    fn current_handler(&self) -> SharedSyncHandler {
        Arc::clone(&self.shared.lock().handler)
    }
}

/// Returns the syncer to `Idle` however the loop task ends
struct LoopExitGuard {
    shared: Arc<Mutex<SyncerShared>>,
    key: NegSyncerKey,
}

impl Drop for LoopExitGuard {
    fn drop(&mut self) {
        let mut shared = self.shared.lock();
        if matches!(shared.state, LoopState::Running { .. }) {
            warn!(key = %self.key, "Sync loop exited without a stop request");
        }
        shared.state = LoopState::Idle;
        drop(shared);
        info!(key = %self.key, "NEG syncer stopped");
    }
}

pub(crate) async fn run(
    mut context: SyncLoopContext,
    mut signals: mpsc::Receiver<()>,
    cancel: CancellationToken,
) {
    let key = context.reporter.key.clone();
    let _exit = LoopExitGuard { shared: Arc::clone(&context.shared), key: key.clone() };

    loop {
        let mut retry = never();

        match context.current_handler().sync().await {
            Ok(()) => {
                trace!(key = %key, "NEG sync succeeded");
                context.backoff.reset_retry_delay();
            }
            Err(err) => {
                let disposition = match context.backoff.next_retry_delay() {
                    Ok(delay) => {
                        retry = context.clock.after(delay);
                        debug!(key = %key, delay = ?delay, "Retry scheduled");
                        RetryDisposition::WillRetry
                    }
                    Err(exhausted) => {
                        debug!(key = %key, error = %exhausted, "Retries exhausted");
                        RetryDisposition::WillNotRetry
                    }
                };

                warn!(
                    key = %key,
                    neg = %context.reporter.neg_name,
                    attempts = context.backoff.attempts(),
                    will_retry = disposition.will_retry(),
                    error = %format!("{err:#}"),
                    "NEG sync failed"
                );
                context.reporter.report(disposition, &err);
            }
        }
        context.retry_attempts.store(context.backoff.attempts(), Ordering::SeqCst);

        // The retry timer is rebuilt every iteration, so a timer that lost the
        // race is dropped (disarmed) here rather than firing later.
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            signal = signals.recv() => {
                if signal.is_none() {
                    break;
                }
                trace!(key = %key, "Sync signal received");
            }
            () = &mut retry => {
                trace!(key = %key, "Retry timer fired");
            }
        }
    }

    debug!(key = %key, "Sync loop exiting");
}
