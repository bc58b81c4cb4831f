//! Fake collaborators for the syncer

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use negsync_core::{EventRecorder, ServiceLister, SyncHandler};
use negsync_domain::{EventType, ServiceRef};
use parking_lot::Mutex;
use tokio::sync::Semaphore;

/// Service lister backed by a fixed list
#[derive(Debug, Default)]
pub struct StaticServiceLister {
    services: Vec<ServiceRef>,
}

impl StaticServiceLister {
    pub fn with_service(namespace: &str, name: &str) -> Self {
        Self { services: vec![ServiceRef::new(namespace, name)] }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl ServiceLister for StaticServiceLister {
    fn get_service(&self, namespace: &str, name: &str) -> Option<ServiceRef> {
        self.services.iter().find(|svc| svc.namespace == namespace && svc.name == name).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub subject: ServiceRef,
    pub event_type: EventType,
    pub reason: String,
    pub message: String,
}

/// Event recorder that keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingEventRecorder {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingEventRecorder {
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }
}

impl EventRecorder for RecordingEventRecorder {
    fn record_event(&self, subject: &ServiceRef, event_type: EventType, reason: &str, message: &str) {
        self.events.lock().push(RecordedEvent {
            subject: subject.clone(),
            event_type,
            reason: reason.to_string(),
            message: message.to_string(),
        });
    }
}

#[derive(Debug)]
struct ScriptedInner {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    fail: AtomicBool,
    gate: Option<Semaphore>,
}

/// Sync handler whose outcome the test controls
#[derive(Debug, Clone)]
pub struct ScriptedHandler {
    inner: Arc<ScriptedInner>,
}

impl ScriptedHandler {
    fn build(fail: bool, gated: bool) -> Self {
        Self {
            inner: Arc::new(ScriptedInner {
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                fail: AtomicBool::new(fail),
                gate: gated.then(|| Semaphore::new(0)),
            }),
        }
    }

    pub fn succeeding() -> Self {
        Self::build(false, false)
    }

    pub fn failing() -> Self {
        Self::build(true, false)
    }

    /// Every call blocks until [`release`](Self::release) hands out a permit
    pub fn gated() -> Self {
        Self::build(false, true)
    }

    pub fn release(&self, calls: usize) {
        if let Some(gate) = &self.inner.gate {
            gate.add_permits(calls);
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.inner.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.inner.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SyncHandler for ScriptedHandler {
    async fn sync(&self) -> anyhow::Result<()> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.inner.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(gate) = &self.inner.gate {
            gate.acquire().await?.forget();
        }

        self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.inner.fail.load(Ordering::SeqCst) {
            anyhow::bail!("cloud API unavailable");
        }
        Ok(())
    }
}
