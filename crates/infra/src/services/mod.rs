//! Service inventory
//!
//! In-memory [`ServiceLister`] the controller keeps current from its service
//! watch. Syncers only read it to resolve event subjects.

use dashmap::DashMap;
use negsync_core::ServiceLister;
use negsync_domain::ServiceRef;
use tracing::debug;

/// Concurrent map of known services keyed by `(namespace, name)`
#[derive(Debug, Default)]
pub struct InMemoryServiceLister {
    services: DashMap<(String, String), ServiceRef>,
}

impl InMemoryServiceLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a service. Returns `true` if it was not known yet.
    pub fn upsert(&self, service: ServiceRef) -> bool {
        let key = (service.namespace.clone(), service.name.clone());
        let added = self.services.insert(key, service).is_none();
        if added {
            debug!(services = self.services.len(), "Service added to inventory");
        }
        added
    }

    /// Forget a service. Returns the removed entry, if any.
    pub fn remove(&self, namespace: &str, name: &str) -> Option<ServiceRef> {
        let removed = self.services.remove(&(namespace.to_string(), name.to_string()));
        removed.map(|(_, service)| service)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceLister for InMemoryServiceLister {
    fn get_service(&self, namespace: &str, name: &str) -> Option<ServiceRef> {
        self.services
            .get(&(namespace.to_string(), name.to_string()))
            .map(|entry| entry.value().clone())
    }
}
