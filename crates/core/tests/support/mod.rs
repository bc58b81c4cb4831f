//! Shared test helpers for `negsync-core` integration tests.
//!
//! In-memory stand-ins for the syncer's collaborators plus a scripted sync
//! handler that counts calls, can be told to fail, and can hold calls open
//! until the test releases them.

#![allow(dead_code)]

pub mod fakes;

use std::sync::Arc;

use negsync_core::Syncer;
use negsync_domain::{BackoffConfig, Config, NegSyncerKey, SyncerConfig};

pub use fakes::{RecordedEvent, RecordingEventRecorder, ScriptedHandler, StaticServiceLister};

pub const NEG_NAME: &str = "k8s1-neg-web-80";

pub fn key() -> NegSyncerKey {
    NegSyncerKey::new("default", "web", 80, "8080")
}

/// Config with a fast retry schedule for real-clock tests
pub fn fast_config(max_retries: u32) -> Config {
    Config {
        backoff: BackoffConfig { max_retries, min_retry_delay_ms: 10, max_retry_delay_ms: 40 },
        syncer: SyncerConfig { stop_timeout_ms: 2_000 },
        ..Config::default()
    }
}

/// Config matching the documented one-second schedule, for mock-clock tests
pub fn second_config(max_retries: u32) -> Config {
    Config {
        backoff: BackoffConfig {
            max_retries,
            min_retry_delay_ms: 1_000,
            max_retry_delay_ms: 60_000,
        },
        syncer: SyncerConfig { stop_timeout_ms: 2_000 },
        ..Config::default()
    }
}

/// A syncer wired to a lister that knows the `default/web` service
pub fn syncer_with(
    config: &Config,
    handler: &ScriptedHandler,
) -> (Syncer, Arc<RecordingEventRecorder>) {
    let lister = Arc::new(StaticServiceLister::with_service("default", "web"));
    let recorder = Arc::new(RecordingEventRecorder::default());
    let syncer = Syncer::new(key(), NEG_NAME, lister, recorder.clone(), config)
        .expect("config should be valid")
        .with_sync_handler(handler.clone());
    (syncer, recorder)
}
