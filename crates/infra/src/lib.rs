//! # NEG Syncer Infrastructure
//!
//! Adapters for the ports defined in `negsync-core`, plus process-level
//! setup.
//!
//! This crate contains:
//! - Configuration loading from environment variables and files
//! - Tracing subscriber installation
//! - An in-memory service inventory
//! - Event recorders backed by `tracing` or memory
//!
//! ## Architecture
//! - Implements traits defined in `negsync-core`
//! - Contains all "impure" code (environment, files, global subscriber)

pub mod config;
pub mod events;
pub mod observability;
pub mod services;

pub use events::{MemoryEventRecorder, RecordedEvent, TracingEventRecorder};
pub use observability::init_tracing;
pub use services::InMemoryServiceLister;
