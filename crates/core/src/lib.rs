//! # negsync Core
//!
//! The NEG syncer: a per-NEG lifecycle state machine and a level-triggered
//! sync loop with coalesced signals and exponential-backoff retry.
//!
//! This crate contains:
//! - Port interfaces for the injected sync operation, the service
//!   inventory and the event sink
//! - The [`Syncer`] and its background loop
//!
//! ## Architecture Principles
//! - Depends only on `negsync-domain` and `negsync-common`
//! - No cloud or cluster client code; all collaborators arrive as traits

pub mod syncer;

pub use syncer::ports::{EventRecorder, ServiceLister, SharedSyncHandler, SyncHandler};
pub use syncer::{Syncer, SyncerError, SyncerPhase, SyncerResult};
