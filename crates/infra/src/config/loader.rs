//! Configuration loader
//!
//! Loads syncer configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If none of the required variables is set, falls back to a config file
//! 3. Probes multiple paths for config files
//! 4. With no config file anywhere, uses the built-in defaults
//!
//! Every loaded configuration is validated before it is returned.
//!
//! ## Environment Variables
//! Required (all three once any of them is set; with none set the
//! environment is ignored):
//! - `NEGSYNC_MAX_RETRIES`: Consecutive failures retried automatically
//! - `NEGSYNC_MIN_RETRY_DELAY_MS`: First retry delay in milliseconds
//! - `NEGSYNC_MAX_RETRY_DELAY_MS`: Retry delay ceiling in milliseconds
//!
//! Optional:
//! - `NEGSYNC_STOP_TIMEOUT_MS`: Bound on waiting for a stopped loop to exit
//! - `NEGSYNC_LOG_LEVEL`: Default log filter when `RUST_LOG` is unset
//! - `NEGSYNC_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./negsync.toml` or `./negsync.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names in the parent directory
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use negsync_domain::{Config, NegSyncError, Result};

pub const ENV_MAX_RETRIES: &str = "NEGSYNC_MAX_RETRIES";
pub const ENV_MIN_RETRY_DELAY_MS: &str = "NEGSYNC_MIN_RETRY_DELAY_MS";
pub const ENV_MAX_RETRY_DELAY_MS: &str = "NEGSYNC_MAX_RETRY_DELAY_MS";
pub const ENV_STOP_TIMEOUT_MS: &str = "NEGSYNC_STOP_TIMEOUT_MS";
pub const ENV_LOG_LEVEL: &str = "NEGSYNC_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "NEGSYNC_LOG_JSON";

const REQUIRED_ENV_VARS: [&str; 3] =
    [ENV_MAX_RETRIES, ENV_MIN_RETRY_DELAY_MS, ENV_MAX_RETRY_DELAY_MS];

const CONFIG_FILE_NAMES: [&str; 4] = ["negsync.toml", "negsync.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// Environment first when any of the required variables is set, otherwise
/// the first config file found by [`probe_config_paths`], otherwise
/// [`Config::default`].
///
/// # Errors
/// Returns `NegSyncError::Config` if an environment variable or config file
/// is present but invalid. A partial or invalid environment is an error,
/// never a reason to fall back.
pub fn load() -> Result<Config> {
    if REQUIRED_ENV_VARS.iter().any(|key| std::env::var_os(key).is_some()) {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }
    tracing::debug!("No NEGSYNC_* backoff variables set, trying file");

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// The three backoff variables are required; the rest fall back to their
/// defaults when unset.
///
/// # Errors
/// Returns `NegSyncError::Config` if a required variable is missing, a value
/// does not parse, or the resulting configuration is invalid.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.backoff.max_retries = env_parse(ENV_MAX_RETRIES)?;
    config.backoff.min_retry_delay_ms = env_parse(ENV_MIN_RETRY_DELAY_MS)?;
    config.backoff.max_retry_delay_ms = env_parse(ENV_MAX_RETRY_DELAY_MS)?;

    if std::env::var(ENV_STOP_TIMEOUT_MS).is_ok() {
        config.syncer.stop_timeout_ms = env_parse(ENV_STOP_TIMEOUT_MS)?;
    }
    if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }
    config.logging.json = env_bool(ENV_LOG_JSON, config.logging.json);

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Supports JSON and
/// TOML (detected by file extension). Sections and fields left out of the
/// file keep their defaults.
///
/// # Errors
/// Returns `NegSyncError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The configuration fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(NegSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            NegSyncError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| NegSyncError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content, by file extension
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| NegSyncError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| NegSyncError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(NegSyncError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a config file
///
/// Searches the current working directory and its parent, then the
/// executable's directory and its parent.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
            roots.push(exe_dir.join(".."));
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Parse a required environment variable
fn env_parse<T>(key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(key).map_err(|_| {
        NegSyncError::Config(format!("Missing required environment variable: {key}"))
    })?;
    raw.trim().parse().map_err(|e| NegSyncError::Config(format!("Invalid value for {key}: {e}")))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Returns `default` if the variable is not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use negsync_domain::constants::DEFAULT_STOP_TIMEOUT_MS;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: [&str; 6] = [
        ENV_MAX_RETRIES,
        ENV_MIN_RETRY_DELAY_MS,
        ENV_MAX_RETRY_DELAY_MS,
        ENV_STOP_TIMEOUT_MS,
        ENV_LOG_LEVEL,
        ENV_LOG_JSON,
    ];

    fn clear_env() {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for value in ["1", "true", "yes", "on", "TRUE"] {
            std::env::set_var("NEGSYNC_TEST_BOOL", value);
            assert!(env_bool("NEGSYNC_TEST_BOOL", false), "{value} should be true");
        }
        for value in ["0", "false", "no", "off"] {
            std::env::set_var("NEGSYNC_TEST_BOOL", value);
            assert!(!env_bool("NEGSYNC_TEST_BOOL", true), "{value} should be false");
        }

        std::env::remove_var("NEGSYNC_TEST_BOOL");
        assert!(env_bool("NEGSYNC_TEST_BOOL", true));
        assert!(!env_bool("NEGSYNC_TEST_BOOL", false));
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_MAX_RETRIES, "4");
        std::env::set_var(ENV_MIN_RETRY_DELAY_MS, "250");
        std::env::set_var(ENV_MAX_RETRY_DELAY_MS, "8000");
        std::env::set_var(ENV_STOP_TIMEOUT_MS, "1500");
        std::env::set_var(ENV_LOG_LEVEL, "negsync_core=debug");
        std::env::set_var(ENV_LOG_JSON, "yes");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.backoff.max_retries, 4);
        assert_eq!(config.backoff.min_retry_delay_ms, 250);
        assert_eq!(config.backoff.max_retry_delay_ms, 8000);
        assert_eq!(config.syncer.stop_timeout_ms, 1500);
        assert_eq!(config.logging.level, "negsync_core=debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_from_env_optional_vars_default() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_MAX_RETRIES, "2");
        std::env::set_var(ENV_MIN_RETRY_DELAY_MS, "100");
        std::env::set_var(ENV_MAX_RETRY_DELAY_MS, "100");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.syncer.stop_timeout_ms, DEFAULT_STOP_TIMEOUT_MS);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_MAX_RETRIES, "2");
        let result = load_from_env();
        clear_env();

        match result {
            Err(NegSyncError::Config(msg)) => assert!(msg.contains(ENV_MIN_RETRY_DELAY_MS)),
            other => panic!("expected missing variable error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_MAX_RETRIES, "many");
        std::env::set_var(ENV_MIN_RETRY_DELAY_MS, "100");
        std::env::set_var(ENV_MAX_RETRY_DELAY_MS, "100");
        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(NegSyncError::Config(_))));
    }

    #[test]
    fn test_load_from_env_rejects_inverted_delays() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_MAX_RETRIES, "3");
        std::env::set_var(ENV_MIN_RETRY_DELAY_MS, "5000");
        std::env::set_var(ENV_MAX_RETRY_DELAY_MS, "1000");
        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(NegSyncError::Config(_))));
    }

    #[test]
    fn test_load_reports_invalid_env_instead_of_falling_back() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_MAX_RETRIES, "many");
        std::env::set_var(ENV_MIN_RETRY_DELAY_MS, "100");
        std::env::set_var(ENV_MAX_RETRY_DELAY_MS, "100");
        let result = load();
        clear_env();

        match result {
            Err(NegSyncError::Config(msg)) => assert!(msg.contains(ENV_MAX_RETRIES)),
            other => panic!("expected invalid variable error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_reports_partial_env() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_MIN_RETRY_DELAY_MS, "100");
        let result = load();
        clear_env();

        assert!(matches!(result, Err(NegSyncError::Config(msg)) if msg.contains(ENV_MAX_RETRIES)));
    }

    #[test]
    fn test_load_uses_env_when_complete() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_MAX_RETRIES, "9");
        std::env::set_var(ENV_MIN_RETRY_DELAY_MS, "100");
        std::env::set_var(ENV_MAX_RETRY_DELAY_MS, "200");
        let result = load();
        clear_env();

        assert_eq!(result.expect("config from env").backoff.max_retries, 9);
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/negsync.toml")));
        assert!(matches!(result, Err(NegSyncError::Config(_))));
    }

    #[test]
    fn test_parse_config_json() {
        let json_content = r#"{
            "backoff": { "max_retries": 5, "min_retry_delay_ms": 100, "max_retry_delay_ms": 900 },
            "logging": { "json": true }
        }"#;

        let config = parse_config(json_content, Path::new("test.json")).unwrap();
        assert_eq!(config.backoff.max_retries, 5);
        assert!(config.logging.json);
        assert_eq!(config.syncer.stop_timeout_ms, DEFAULT_STOP_TIMEOUT_MS);
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_content = r#"
[backoff]
max_retries = 7

[syncer]
stop_timeout_ms = 250
"#;

        let config = parse_config(toml_content, Path::new("test.toml")).unwrap();
        assert_eq!(config.backoff.max_retries, 7);
        assert_eq!(config.syncer.stop_timeout_ms, 250);
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("max_retries: 3", Path::new("test.yaml"));
        assert!(matches!(result, Err(NegSyncError::Config(_))));
    }

    #[test]
    fn test_parse_config_defaults_to_json_without_extension() {
        let config = parse_config("{}", Path::new("negsync")).unwrap();
        assert_eq!(config, Config::default());
    }
}
