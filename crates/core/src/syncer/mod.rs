//! Per-NEG syncer
//!
//! A [`Syncer`] is created once per monitored NEG. `start` spawns the
//! background loop, `sync` requests a reconciliation, `stop` tears the loop
//! down. Start/stop may repeat across the syncer's lifetime; each start gets
//! a fresh signal channel, cancellation token and backoff schedule.

pub mod error;
pub mod ports;
pub mod service;
pub mod state;

mod sync_loop;

pub use error::{SyncerError, SyncerResult};
pub use service::Syncer;
pub use state::SyncerPhase;
