//! Domain types for the NEG syncer
//!
//! Identity of the service port being synced, the subject events are
//! recorded against, and the small enums that appear in event messages.

pub mod event;
pub mod key;

pub use event::{EventType, RetryDisposition};
pub use key::{NegSyncerKey, ServiceRef};
