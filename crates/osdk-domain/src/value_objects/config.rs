//! Cache configuration value object

use crate::constants::{LOCAL_BACKEND_TYPE, REDIS_DEFAULT_PORT, REMOTE_DEFAULT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration record for one named cache
///
/// Immutable once loaded; only used to construct a backend through the
/// registry. Field aliases accept the names used by older YAML configs.
///
/// ```toml
/// [[caches]]
/// key = "MainRedis"
/// type = "redis"
/// host = "127.0.0.1"
/// port = 6379
/// password = "secret"
/// db = 0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Identifier callers use to look the cache up (e.g. "MainRedis")
    pub key: String,

    /// Registered backend type name (e.g. "redis", "local")
    #[serde(rename = "type", alias = "backend_type")]
    pub backend_type: String,

    /// Remote host
    #[serde(default, alias = "ip")]
    pub host: String,

    /// Remote port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Remote credential (password)
    #[serde(default, alias = "password", skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,

    /// Remote logical database index
    #[serde(default, alias = "db")]
    pub database_index: i64,

    /// TTL in seconds used by `CacheBackend::set_default` (0 = never expires)
    #[serde(default)]
    pub default_ttl_secs: u64,

    /// Per-operation deadline for remote calls in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_port() -> u16 {
    REDIS_DEFAULT_PORT
}

fn default_timeout_ms() -> u64 {
    REMOTE_DEFAULT_TIMEOUT_MS
}

impl CacheConfig {
    /// Create a config for the given cache key and backend type
    pub fn new(key: impl Into<String>, backend_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            backend_type: backend_type.into(),
            host: String::new(),
            port: REDIS_DEFAULT_PORT,
            credential: None,
            database_index: 0,
            default_ttl_secs: 0,
            timeout_ms: REMOTE_DEFAULT_TIMEOUT_MS,
        }
    }

    /// Create a config for a process-local cache
    pub fn local(key: impl Into<String>, default_ttl: Duration) -> Self {
        Self::new(key, LOCAL_BACKEND_TYPE).with_default_ttl(default_ttl)
    }

    /// Set host and port
    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Set the credential
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// Set the database index
    pub fn with_database_index(mut self, index: i64) -> Self {
        self.database_index = index;
        self
    }

    /// Set the TTL used by `CacheBackend::set_default`
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl_secs = ttl.as_secs();
        self
    }

    /// Set the remote operation deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Default TTL as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Remote operation deadline as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Credential, treating an empty string as absent
    pub fn effective_credential(&self) -> Option<&str> {
        self.credential.as_deref().filter(|c| !c.is_empty())
    }
}
