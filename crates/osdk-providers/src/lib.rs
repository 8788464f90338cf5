//! # open-sdk cache - Backend Implementations
//!
//! Concrete implementations of the ports defined in `osdk-domain`.
//!
//! | Port | Implementations |
//! |------|-----------------|
//! | `CacheBackend` | [`LocalTtlCache`](cache::LocalTtlCache), [`RemoteScalarCache`](cache::RemoteScalarCache) |
//! | `RemoteStore` | [`InMemoryStore`](remote::InMemoryStore), `RedisStore` |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! osdk-providers = { version = "0.1", default-features = false }
//! ```
//!
//! Without `cache-redis` only the `local` and `memory` backend types are
//! registered.

pub use osdk_domain::error::{Error, Result};
pub use osdk_domain::ports::providers::{CacheBackend, RemoteStore};

/// Provider-specific constants
pub mod constants;

/// Cache backend implementations
pub mod cache;

/// Remote store implementations
pub mod remote;
