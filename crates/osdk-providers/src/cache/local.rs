//! Process-local TTL cache
//!
//! A map guarded by a single read/write lock. Reads take the shared lock,
//! writes take the exclusive one.
//!
//! ## Expiry
//!
//! - **Lazy**: [`LocalTtlCache::get`] treats an entry as absent once
//!   `now > expire_at`, without evicting it. This alone makes expired keys
//!   unreadable.
//! - **Swept**: [`LocalTtlCache::cleanup`] evicts every expired entry. It
//!   only reclaims memory and must be driven from outside; the cache never
//!   schedules anything itself.
//!
//! ## Example
//!
//! ```ignore
//! use osdk_providers::cache::LocalTtlCache;
//! use std::time::Duration;
//!
//! let cache: LocalTtlCache<String> = LocalTtlCache::new(Duration::from_secs(60));
//! cache.insert("session:1", "alice".to_string());
//! assert_eq!(cache.get("session:1").as_deref(), Some("alice"));
//! ```

use async_trait::async_trait;
use osdk_application::ports::registry::{BackendFuture, CACHE_BACKENDS, CacheBackendEntry};
use osdk_domain::constants::LOCAL_BACKEND_TYPE;
use osdk_domain::error::Result;
use osdk_domain::ports::providers::CacheBackend;
use osdk_domain::value_objects::{CacheConfig, CacheValue};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    /// `None` never expires
    expire_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expire_at.is_some_and(|at| now > at)
    }
}

/// Concurrency-safe in-process cache with a fixed default TTL
pub struct LocalTtlCache<V = CacheValue> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    default_ttl: Duration,
}

impl<V> LocalTtlCache<V> {
    /// Create a cache whose plain inserts live for `default_ttl`
    ///
    /// `Duration::ZERO` makes plain inserts never expire.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    /// TTL applied by [`insert`](Self::insert)
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Insert with the default TTL
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    /// Insert with an explicit TTL; zero never expires
    pub fn insert_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let expire_at = if ttl.is_zero() {
            None
        } else {
            Instant::now().checked_add(ttl)
        };
        self.write()
            .insert(key.into(), CacheEntry { value, expire_at });
    }

    /// Whether `key` holds a live entry
    pub fn contains_key(&self, key: &str) -> bool {
        let now = Instant::now();
        self.read().get(key).is_some_and(|e| !e.is_expired(now))
    }

    /// Remove `key`, reporting whether a live entry was present
    ///
    /// An expired entry is dropped too but counts as absent.
    pub fn remove(&self, key: &str) -> bool {
        let now = Instant::now();
        self.write()
            .remove(key)
            .is_some_and(|e| !e.is_expired(now))
    }

    /// Evict every expired entry, returning how many were evicted
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now));
        before - entries.len()
    }

    /// Number of stored entries, including expired ones not yet swept
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no entries are stored
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Every mutation is a single map call, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> LocalTtlCache<V> {
    /// Get a live value
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        self.read()
            .get(key)
            .filter(|e| !e.is_expired(now))
            .map(|e| e.value.clone())
    }
}

impl<V> Default for LocalTtlCache<V> {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl<V> fmt::Debug for LocalTtlCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalTtlCache")
            .field("default_ttl", &self.default_ttl)
            .field("entries", &self.len())
            .finish()
    }
}

#[async_trait]
impl CacheBackend for LocalTtlCache<CacheValue> {
    async fn get(&self, key: &str) -> Result<Option<CacheValue>> {
        Ok(LocalTtlCache::get(self, key))
    }

    async fn set(&self, key: &str, value: CacheValue, ttl: Duration) -> Result<()> {
        self.insert_with_ttl(key, value, ttl);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool> {
        Ok(self.remove(key))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.contains_key(key))
    }

    fn backend_name(&self) -> &str {
        LOCAL_BACKEND_TYPE
    }

    fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    async fn sweep_expired(&self) -> Result<usize> {
        let evicted = self.cleanup();
        debug!(evicted, remaining = self.len(), "Swept local cache");
        Ok(evicted)
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

fn local_backend_factory(config: CacheConfig) -> BackendFuture {
    Box::pin(async move {
        let cache: LocalTtlCache = LocalTtlCache::new(config.default_ttl());
        Ok(Arc::new(cache) as Arc<dyn CacheBackend>)
    })
}

#[linkme::distributed_slice(CACHE_BACKENDS)]
static LOCAL_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: LOCAL_BACKEND_TYPE,
    description: "Process-local TTL cache with lazy expiry",
    factory: local_backend_factory,
};
