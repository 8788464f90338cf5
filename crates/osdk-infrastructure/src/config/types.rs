//! Configuration data types

use crate::constants::{DEFAULT_CLEANUP_INTERVAL_SECS, DEFAULT_LOG_LEVEL};
use osdk_domain::value_objects::CacheConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Logging settings
    pub logging: LoggingConfig,

    /// Periodic expiry sweep settings
    pub cleanup: CleanupConfig,

    /// Named caches, built in order
    pub caches: Vec<CacheConfig>,
}

impl AppConfig {
    /// Configuration record of the cache named `key`
    pub fn cache(&self, key: &str) -> Option<&CacheConfig> {
        self.caches.iter().find(|c| c.key == key)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Expiry sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CleanupConfig {
    /// Whether a background sweep should be started
    pub enabled: bool,

    /// Seconds between sweeps
    pub interval_secs: u64,
}

impl CleanupConfig {
    /// Sweep interval as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: DEFAULT_CLEANUP_INTERVAL_SECS,
        }
    }
}
