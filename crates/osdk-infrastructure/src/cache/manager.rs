//! Named cache manager
//!
//! Builds every configured cache once, through a [`BackendRegistry`], and
//! hands them out by their configured key (e.g. `"MainRedis"`).

use crate::logging::log_health_check;
use futures::future::join_all;
use osdk_application::{BackendRegistry, OrderedMailbox};
use osdk_domain::error::{Error, Result};
use osdk_domain::ports::providers::CacheBackend;
use osdk_domain::value_objects::CacheConfig;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Liveness of one configured cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheHealth {
    /// Configured cache key
    pub key: String,
    /// Backend implementation name
    pub backend: String,
    /// Whether the ping succeeded
    pub healthy: bool,
    /// Failure description when unhealthy
    pub details: Option<String>,
}

/// Caches built from configuration, addressed by key
#[derive(Debug, Clone, Default)]
pub struct CacheManager {
    caches: BTreeMap<String, Arc<dyn CacheBackend>>,
}

impl CacheManager {
    /// Build every configured cache
    ///
    /// Fails on a duplicate key before anything is built, and on the first
    /// backend that cannot be constructed.
    pub async fn from_configs(registry: &BackendRegistry, configs: &[CacheConfig]) -> Result<Self> {
        let mut keys = HashSet::new();
        if let Some(dup) = configs.iter().find(|c| !keys.insert(c.key.as_str())) {
            return Err(Error::configuration(format!(
                "Duplicate cache key '{}'",
                dup.key
            )));
        }

        let mut caches = BTreeMap::new();
        for config in configs {
            let backend = registry.create(config).await?;
            caches.insert(config.key.clone(), backend);
        }

        info!(caches = caches.len(), "Cache manager ready");
        Ok(Self { caches })
    }

    /// Add an already built backend under `key`, replacing any previous one
    pub fn insert(&mut self, key: impl Into<String>, backend: Arc<dyn CacheBackend>) {
        self.caches.insert(key.into(), backend);
    }

    /// Backend configured under `key`
    pub fn get(&self, key: &str) -> Option<Arc<dyn CacheBackend>> {
        self.caches.get(key).cloned()
    }

    /// Configured keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        self.caches.keys().map(String::as_str).collect()
    }

    /// Number of caches
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    /// Whether no cache is configured
    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    /// Mailbox over the remote store of the cache configured under `key`
    pub fn mailbox(&self, key: &str) -> Result<OrderedMailbox> {
        let backend = self
            .caches
            .get(key)
            .ok_or_else(|| Error::invalid_argument(format!("No cache configured as '{key}'")))?;
        OrderedMailbox::from_backend(backend.as_ref())
    }

    /// Ping every cache concurrently
    pub async fn health_check(&self) -> Vec<CacheHealth> {
        let checks = self.caches.iter().map(|(key, backend)| async move {
            let result = backend.ping().await;
            let details = result.as_ref().err().map(ToString::to_string);
            log_health_check(key, result.is_ok(), details.as_deref());
            CacheHealth {
                key: key.clone(),
                backend: backend.backend_name().to_string(),
                healthy: result.is_ok(),
                details,
            }
        });
        join_all(checks).await
    }

    /// Sweep expired entries from every cache, returning the total evicted
    ///
    /// A cache whose sweep fails is logged and skipped.
    pub async fn sweep_expired(&self) -> usize {
        let mut total = 0;
        for (key, backend) in &self.caches {
            match backend.sweep_expired().await {
                Ok(evicted) => total += evicted,
                Err(e) => warn!(cache = %key, error = %e, "Expiry sweep failed"),
            }
        }
        debug!(evicted = total, "Expiry sweep finished");
        total
    }
}
