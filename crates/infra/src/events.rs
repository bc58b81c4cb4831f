//! Event recorders
//!
//! [`TracingEventRecorder`] turns syncer events into structured log records;
//! [`MemoryEventRecorder`] keeps them in memory for dry runs and tests.

use std::collections::VecDeque;

use negsync_core::EventRecorder;
use negsync_domain::{EventType, ServiceRef};
use parking_lot::Mutex;
use serde::Serialize;

/// Emits every event as a `tracing` record at the matching level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventRecorder;

impl EventRecorder for TracingEventRecorder {
    fn record_event(&self, subject: &ServiceRef, event_type: EventType, reason: &str, message: &str) {
        match event_type {
            EventType::Normal => {
                tracing::info!(target: "negsync::events", subject = %subject, reason, "{message}");
            }
            EventType::Warning => {
                tracing::warn!(target: "negsync::events", subject = %subject, reason, "{message}");
            }
        }
    }
}

/// One captured event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedEvent {
    pub subject: ServiceRef,
    pub event_type: EventType,
    pub reason: String,
    pub message: String,
}

/// Keeps events in memory, bounded to the most recent `capacity`
#[derive(Debug)]
pub struct MemoryEventRecorder {
    capacity: usize,
    events: Mutex<VecDeque<RecordedEvent>>,
}

impl MemoryEventRecorder {
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, events: Mutex::new(VecDeque::with_capacity(capacity)) }
    }

    /// Snapshot of the captured events, oldest first
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().iter().cloned().collect()
    }

    pub fn events_for(&self, subject: &ServiceRef) -> Vec<RecordedEvent> {
        self.events.lock().iter().filter(|event| &event.subject == subject).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Captured events as a JSON array
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.events.lock())
    }
}

impl Default for MemoryEventRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRecorder for MemoryEventRecorder {
    fn record_event(&self, subject: &ServiceRef, event_type: EventType, reason: &str, message: &str) {
        let mut events = self.events.lock();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(RecordedEvent {
            subject: subject.clone(),
            event_type,
            reason: reason.to_string(),
            message: message.to_string(),
        });
    }
}
