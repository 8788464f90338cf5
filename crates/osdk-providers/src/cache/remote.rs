//! Remote scalar cache
//!
//! Adapts a [`RemoteStore`] to the [`CacheBackend`] contract. Each call is a
//! single remote round trip; a remote miss becomes `Ok(None)` and every other
//! fault propagates unchanged.
//!
//! ## Example
//!
//! ```ignore
//! use osdk_providers::cache::RemoteScalarCache;
//! use osdk_providers::remote::RedisStore;
//!
//! let store = RedisStore::connect(&config).await?;
//! let cache = RemoteScalarCache::new(Arc::new(store));
//! let mailbox = OrderedMailbox::new(cache.store().clone());
//! ```

use crate::remote::InMemoryStore;
use async_trait::async_trait;
use osdk_application::ports::registry::{BackendFuture, CACHE_BACKENDS, CacheBackendEntry};
use osdk_domain::error::Result;
use osdk_domain::ports::providers::{CacheBackend, RemoteStore};
use osdk_domain::value_objects::{CacheConfig, CacheValue};
use std::sync::Arc;
use std::time::Duration;

/// Scalar cache backed by a remote key-value store
#[derive(Clone, Debug)]
pub struct RemoteScalarCache {
    store: Arc<dyn RemoteStore>,
    default_ttl: Duration,
}

impl RemoteScalarCache {
    /// Wrap a remote store handle; `set_default` writes never expire
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            default_ttl: Duration::ZERO,
        }
    }

    /// Use `ttl` for `set_default` writes
    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// The raw remote store handle
    pub fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }
}

#[async_trait]
impl CacheBackend for RemoteScalarCache {
    async fn get(&self, key: &str) -> Result<Option<CacheValue>> {
        Ok(self.store.get(key).await?.map(CacheValue::Text))
    }

    async fn set(&self, key: &str, value: CacheValue, ttl: Duration) -> Result<()> {
        let ttl = (!ttl.is_zero()).then_some(ttl);
        self.store.set(key, &value.to_wire(), ttl).await
    }

    async fn del(&self, key: &str) -> Result<bool> {
        self.store.del(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.store.exists(key).await
    }

    fn backend_name(&self) -> &str {
        self.store.store_name()
    }

    fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }

    fn remote_store(&self) -> Option<Arc<dyn RemoteStore>> {
        Some(Arc::clone(&self.store))
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

fn memory_backend_factory(config: CacheConfig) -> BackendFuture {
    Box::pin(async move {
        let store: Arc<dyn RemoteStore> = Arc::new(InMemoryStore::new());
        let cache = RemoteScalarCache::new(store).with_default_ttl(config.default_ttl());
        Ok(Arc::new(cache) as Arc<dyn CacheBackend>)
    })
}

#[linkme::distributed_slice(CACHE_BACKENDS)]
static MEMORY_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: crate::constants::MEMORY_BACKEND_TYPE,
    description: "In-process emulation of a remote store (scalars and sorted sets)",
    factory: memory_backend_factory,
};

#[cfg(feature = "cache-redis")]
mod redis_registration {
    use super::RemoteScalarCache;
    use crate::remote::RedisStore;
    use osdk_application::ports::registry::{BackendFuture, CACHE_BACKENDS, CacheBackendEntry};
    use osdk_domain::constants::REDIS_BACKEND_TYPE;
    use osdk_domain::error::Result;
    use osdk_domain::ports::providers::CacheBackend;
    use osdk_domain::value_objects::CacheConfig;
    use std::sync::Arc;

    /// Connects and pings before handing the backend out.
    async fn connect_redis_backend(config: CacheConfig) -> Result<Arc<dyn CacheBackend>> {
        let store = RedisStore::connect(&config).await?;
        Ok(Arc::new(
            RemoteScalarCache::new(Arc::new(store)).with_default_ttl(config.default_ttl()),
        ))
    }

    fn redis_backend_factory(config: CacheConfig) -> BackendFuture {
        Box::pin(connect_redis_backend(config))
    }

    #[linkme::distributed_slice(CACHE_BACKENDS)]
    static REDIS_BACKEND: CacheBackendEntry = CacheBackendEntry {
        name: REDIS_BACKEND_TYPE,
        description: "Redis-backed scalar cache with sorted-set mailboxes",
        factory: redis_backend_factory,
    };
}
