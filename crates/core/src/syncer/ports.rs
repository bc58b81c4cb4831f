//! Port interfaces for syncer collaborators

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use negsync_domain::{EventType, ServiceRef};

/// The reconciliation the syncer drives.
///
/// Called from the sync loop only, one call at a time per syncer. The loop
/// enforces no timeout; a slow call delays the next wake-up.
#[async_trait]
pub trait SyncHandler: Send + Sync {
    async fn sync(&self) -> anyhow::Result<()>;
}

/// Shared handle to a sync handler
pub type SharedSyncHandler = Arc<dyn SyncHandler>;

#[async_trait]
impl<F, Fut> SyncHandler for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn sync(&self) -> anyhow::Result<()> {
        (self)().await
    }
}

/// Inventory of known services, used to resolve event subjects
pub trait ServiceLister: Send + Sync {
    fn get_service(&self, namespace: &str, name: &str) -> Option<ServiceRef>;
}

/// Sink for operator-visible events.
///
/// Fire-and-forget: implementations must not block for long and cannot fail
/// the caller.
pub trait EventRecorder: Send + Sync {
    fn record_event(&self, subject: &ServiceRef, event_type: EventType, reason: &str, message: &str);
}
