//! Lifecycle states
//!
//! The loop's resources live inside the `Running` variant, so a signal
//! channel exists exactly while a loop is running and "shutting down but
//! not stopped" has no representation.

use negsync_domain::impl_domain_status_conversions;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::syncer::ports::SharedSyncHandler;

/// Observable lifecycle phase of a syncer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncerPhase {
    /// No loop; initial and terminal phase
    Idle,
    /// Loop active and accepting sync signals
    Running,
    /// Stop requested, loop not yet exited
    Stopping,
}

impl_domain_status_conversions!(SyncerPhase {
    Idle => "idle",
    Running => "running",
    Stopping => "stopping",
});

impl SyncerPhase {
    pub fn is_stopped(self) -> bool {
        !matches!(self, Self::Running)
    }

    pub fn is_shutting_down(self) -> bool {
        matches!(self, Self::Stopping)
    }
}

pub(crate) enum LoopState {
    Idle,
    Running {
        /// Single-slot coalescing work signal
        signals: mpsc::Sender<()>,
        cancel: CancellationToken,
    },
    Stopping,
}

impl LoopState {
    pub(crate) fn phase(&self) -> SyncerPhase {
        match self {
            Self::Idle => SyncerPhase::Idle,
            Self::Running { .. } => SyncerPhase::Running,
            Self::Stopping => SyncerPhase::Stopping,
        }
    }
}

/// Everything guarded by the syncer's state mutex
pub(crate) struct SyncerShared {
    pub(crate) state: LoopState,
    pub(crate) handler: SharedSyncHandler,
    pub(crate) task: Option<JoinHandle<()>>,
}

impl SyncerShared {
    pub(crate) fn new(handler: SharedSyncHandler) -> Self {
        Self { state: LoopState::Idle, handler, task: None }
    }
}
