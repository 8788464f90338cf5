//! Cache Backend Port
//!
//! The contract every backend satisfies, local or remote. Surrounding code
//! (HTTP handlers, mailbox consumers) only ever holds an
//! `Arc<dyn CacheBackend>`.
//!
//! ## Miss vs. fault
//!
//! A getter returns `Ok(None)` exactly when the key is absent or expired.
//! Anything else that goes wrong (unreachable store, deadline exceeded,
//! unparsable stored text) is an `Err`, never folded into a miss.
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//!
//! cache.set("login:42", true.into(), Duration::from_secs(300)).await?;
//! if let Some(logged_in) = cache.get_bool("login:42").await? {
//!     // ...
//! }
//! ```

use super::remote::RemoteStore;
use crate::error::Result;
use crate::value_objects::CacheValue;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Cache Backend Port
///
/// # Implementations
///
/// - **LocalTtlCache**: in-process map with lazy expiry and explicit sweep
/// - **RemoteScalarCache**: adapter over a [`RemoteStore`] (Redis)
#[async_trait]
pub trait CacheBackend: Send + Sync + std::fmt::Debug {
    /// Get the raw value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<CacheValue>>;

    /// Store `value` under `key`
    ///
    /// A zero `ttl` means the key never expires; otherwise it expires `ttl`
    /// after the call.
    async fn set(&self, key: &str, value: CacheValue, ttl: Duration) -> Result<()>;

    /// TTL applied by [`set_default`](Self::set_default); zero never expires
    fn default_ttl(&self) -> Duration {
        Duration::ZERO
    }

    /// Store `value` under `key` with the backend's configured default TTL
    async fn set_default(&self, key: &str, value: CacheValue) -> Result<()> {
        self.set(key, value, self.default_ttl()).await
    }

    /// Delete `key`, reporting whether it was present
    async fn del(&self, key: &str) -> Result<bool>;

    /// Check whether `key` is present and not expired
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Name of the backend implementation (e.g. "local", "redis")
    fn backend_name(&self) -> &str;

    /// Liveness check against whatever the backend depends on
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Actively evict expired entries, returning how many were removed
    ///
    /// Backends whose store expires keys on its own report zero.
    async fn sweep_expired(&self) -> Result<usize> {
        Ok(0)
    }

    /// Raw remote handle for primitives beyond the scalar contract
    fn remote_store(&self) -> Option<Arc<dyn RemoteStore>> {
        None
    }

    /// Get a 32-bit integer
    async fn get_int(&self, key: &str) -> Result<Option<i32>> {
        self.get(key).await?.map(|v| v.to_i32()).transpose()
    }

    /// Get a 64-bit integer
    async fn get_int64(&self, key: &str) -> Result<Option<i64>> {
        self.get(key).await?.map(|v| v.to_i64()).transpose()
    }

    /// Get a 32-bit float
    async fn get_float32(&self, key: &str) -> Result<Option<f32>> {
        self.get(key).await?.map(|v| v.to_f32()).transpose()
    }

    /// Get a 64-bit float
    async fn get_float64(&self, key: &str) -> Result<Option<f64>> {
        self.get(key).await?.map(|v| v.to_f64()).transpose()
    }

    /// Get a string
    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key).await?.map(CacheValue::into_text))
    }

    /// Get a boolean stored as "1" / "0"; any other text reads as absent
    async fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.get(key).await?.and_then(|v| v.to_bool()))
    }
}
