//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables,
//! and default values, using Figment for the layering.

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use osdk_domain::constants::REDIS_BACKEND_TYPE;
use osdk_domain::error::{Error, Result};
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first `osdk.toml` found)
    /// 3. Environment variables with prefix (e.g., `OSDK_LOGGING__LEVEL`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(config_path) if config_path.exists() => {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            }
            Some(config_path) => log_config_loaded(config_path, false),
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    log_config_loaded(&default_path, true);
                }
            }
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file as TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configured file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_logging_config(config)?;
    validate_cleanup_config(config)?;
    validate_cache_configs(config)?;
    Ok(())
}

fn validate_logging_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_cleanup_config(config: &AppConfig) -> Result<()> {
    if config.cleanup.enabled && config.cleanup.interval_secs == 0 {
        return Err(Error::configuration(
            "Cleanup interval cannot be 0 when cleanup is enabled",
        ));
    }
    Ok(())
}

fn validate_cache_configs(config: &AppConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for cache in &config.caches {
        if cache.key.trim().is_empty() {
            return Err(Error::configuration("Cache key cannot be empty"));
        }
        if !seen.insert(cache.key.as_str()) {
            return Err(Error::configuration(format!(
                "Duplicate cache key '{}'",
                cache.key
            )));
        }
        if cache.backend_type.trim().is_empty() {
            return Err(Error::configuration(format!(
                "Cache '{}' has no backend type",
                cache.key
            )));
        }
        if cache.backend_type == REDIS_BACKEND_TYPE {
            if cache.host.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "Cache '{}' requires a host",
                    cache.key
                )));
            }
            if cache.port == 0 {
                return Err(Error::configuration(format!(
                    "Cache '{}' port cannot be 0",
                    cache.key
                )));
            }
            if cache.timeout_ms == 0 {
                return Err(Error::configuration(format!(
                    "Cache '{}' timeout cannot be 0",
                    cache.key
                )));
            }
        }
    }
    Ok(())
}
