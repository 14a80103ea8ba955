//! Configuration module for scribesync.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, and defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for scribesync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub sync: SyncConfig,
    pub notifications: NotificationsConfig,
    pub logging: LoggingConfig,
}

/// Backend API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the pipeline backend, e.g. `https://scribe.example.com`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Name of the environment variable holding the bearer token.
    ///
    /// The token itself never lives in the config file. Refresh mechanics
    /// are out of scope; a stale token simply surfaces as request failures.
    pub token_env: String,
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Seconds between dashboard polling cycles.
    pub poll_interval_secs: u64,
    /// Maximum concurrent per-task progress fetches within one sync pass.
    pub progress_concurrency: usize,
}

/// Notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Master switch; when false the notifier is never consulted.
    pub enabled: bool,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/scribesync/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("scribesync")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            token_env: "SCRIBE_TOKEN".to_string(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            // The interval the production dashboard polls at.
            poll_interval_secs: 5,
            progress_concurrency: 8,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"sync.poll_interval_secs"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- api ---
        if self.api.base_url.is_empty() {
            errors.push(ValidationError {
                field: "api.base_url".into(),
                message: "must not be empty".into(),
            });
        } else if !self.api.base_url.starts_with("http://")
            && !self.api.base_url.starts_with("https://")
        {
            errors.push(ValidationError {
                field: "api.base_url".into(),
                message: "must start with http:// or https://".into(),
            });
        }
        if self.api.request_timeout_secs == 0 {
            errors.push(ValidationError {
                field: "api.request_timeout_secs".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- sync ---
        if self.sync.poll_interval_secs == 0 {
            errors.push(ValidationError {
                field: "sync.poll_interval_secs".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.sync.progress_concurrency == 0 {
            errors.push(ValidationError {
                field: "sync.progress_concurrency".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!("must be one of {VALID_LOG_LEVELS:?}"),
            });
        }

        errors
    }
}
