//! Domain constants
//!
//! Centralized location for the defaults and event vocabulary shared by the
//! syncer and its adapters.

// Backoff defaults
pub const DEFAULT_MAX_RETRIES: u32 = 15;
pub const DEFAULT_MIN_RETRY_DELAY_MS: u64 = 5_000;
pub const DEFAULT_MAX_RETRY_DELAY_MS: u64 = 600_000;

// Lifecycle defaults
pub const DEFAULT_STOP_TIMEOUT_MS: u64 = 5_000;

// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Event vocabulary
pub const SYNC_FAILED_REASON: &str = "SyncNetworkEndpointGroupFailed";
