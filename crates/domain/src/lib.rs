//! # negsync Domain
//!
//! Domain types for the network endpoint group (NEG) syncer.
//!
//! This crate contains:
//! - Syncer identity (`NegSyncerKey`) and event subjects (`ServiceRef`)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other negsync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
