//! Cache Backend Registry
//!
//! Maps a backend type name to a constructor and builds backends from a
//! [`CacheConfig`]. Registries are explicit instances: there is no
//! process-wide mutable map, so tests can build isolated registries.
//!
//! Providers submit a [`CacheBackendEntry`] to the [`CACHE_BACKENDS`]
//! linkme slice at compile time; [`BackendRegistry::with_registered_backends`]
//! seeds a fresh registry from that slice.

use futures::future::BoxFuture;
use osdk_domain::error::{Error, Result};
use osdk_domain::ports::providers::CacheBackend;
use osdk_domain::value_objects::CacheConfig;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Future returned by a backend constructor
pub type BackendFuture = BoxFuture<'static, Result<Arc<dyn CacheBackend>>>;

/// Type-erased backend constructor held by a registry
pub type BackendConstructor = Arc<dyn Fn(CacheConfig) -> BackendFuture + Send + Sync>;

/// Registry entry for cache backends
///
/// Each backend implementation registers itself with this entry using
/// `#[linkme::distributed_slice(CACHE_BACKENDS)]`. Constructors of remote
/// backends must check liveness before resolving successfully.
pub struct CacheBackendEntry {
    /// Unique backend type name (e.g., "local", "redis")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create backend instances
    pub factory: fn(CacheConfig) -> BackendFuture,
}

// Auto-collection via linkme distributed slices - providers submit entries at compile time
#[linkme::distributed_slice]
pub static CACHE_BACKENDS: [CacheBackendEntry] = [..];

/// List all compile-time registered cache backends
///
/// Returns `(name, description)` pairs, useful for diagnostics.
pub fn list_cache_backends() -> Vec<(&'static str, &'static str)> {
    CACHE_BACKENDS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}

/// Registry of backend constructors keyed by backend type name
#[derive(Clone, Default)]
pub struct BackendRegistry {
    constructors: HashMap<String, BackendConstructor>,
}

impl BackendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with every compile-time registered backend
    pub fn with_registered_backends() -> Self {
        let mut registry = Self::new();
        for entry in CACHE_BACKENDS {
            registry.register(entry.name, entry.factory);
        }
        registry
    }

    /// Register (or replace) the constructor for a backend type
    ///
    /// Last writer wins; registering the same constructor twice is harmless.
    pub fn register<F, Fut>(&mut self, backend_type: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(CacheConfig) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn CacheBackend>>> + Send + 'static,
    {
        let backend_type = backend_type.into();
        let constructor: BackendConstructor =
            Arc::new(move |config| Box::pin(constructor(config)) as BackendFuture);
        if self
            .constructors
            .insert(backend_type.clone(), constructor)
            .is_some()
        {
            debug!(backend_type = %backend_type, "Replaced cache backend constructor");
        } else {
            debug!(backend_type = %backend_type, "Registered cache backend constructor");
        }
        self
    }

    /// Whether a constructor is registered for `backend_type`
    pub fn contains(&self, backend_type: &str) -> bool {
        self.constructors.contains_key(backend_type)
    }

    /// Registered backend type names, sorted
    pub fn backend_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.constructors.keys().cloned().collect();
        types.sort();
        types
    }

    /// Build the backend described by `config`
    ///
    /// Fails with `BackendNotRegistered` for an unknown type and propagates
    /// any construction error (e.g. an unreachable remote host) unchanged.
    pub async fn create(&self, config: &CacheConfig) -> Result<Arc<dyn CacheBackend>> {
        let constructor = self
            .constructors
            .get(&config.backend_type)
            .ok_or_else(|| Error::backend_not_registered(&config.backend_type, self.backend_types()))?;

        let backend = constructor(config.clone()).await.inspect_err(|e| {
            warn!(
                cache = %config.key,
                backend_type = %config.backend_type,
                error = %e,
                "Cache backend construction failed"
            );
        })?;

        info!(
            cache = %config.key,
            backend = backend.backend_name(),
            "Cache backend constructed"
        );
        Ok(backend)
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backend_types", &self.backend_types())
            .finish()
    }
}
