//! Logging setup
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` takes precedence
//! over the configured level so operators can raise verbosity for a single
//! run without touching config files.

use negsync_domain::{LoggingConfig, NegSyncError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Build the log filter: `RUST_LOG` if set and valid, otherwise the
/// configured level.
///
/// # Errors
/// Returns `NegSyncError::Config` if the configured level is not a valid
/// filter directive.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level)
        .map_err(|e| NegSyncError::Config(format!("Invalid log level '{}': {e}", config.level)))
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` without changing anything when a subscriber is
/// already installed, so calling it more than once is harmless.
///
/// # Errors
/// Returns `NegSyncError::Config` if the configured level does not parse.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    let filter = build_filter(config)?;

    let installed = if config.json {
        tracing_subscriber::registry().with(filter).with(fmt::layer().json()).try_init()
    } else {
        tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(true)).try_init()
    };

    match installed {
        Ok(()) => {
            tracing::debug!(level = %config.level, json = config.json, "Tracing initialized");
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}
