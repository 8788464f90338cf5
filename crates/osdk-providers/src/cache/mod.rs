//! Cache Backend Implementations
//!
//! ## Available Backends
//!
//! | Type name | Backend | Description |
//! |-----------|---------|-------------|
//! | `local` | [`LocalTtlCache`] | Process-local map with lazy expiry |
//! | `redis` | [`RemoteScalarCache`] over `RedisStore` | Shared across processes |
//! | `memory` | [`RemoteScalarCache`] over `InMemoryStore` | Remote semantics without a server |
//!
//! Every backend registers itself in `CACHE_BACKENDS`, so linking this crate
//! is enough for `BackendRegistry::with_registered_backends` to see them.

pub mod local;
pub mod remote;

pub use local::LocalTtlCache;
pub use remote::RemoteScalarCache;
