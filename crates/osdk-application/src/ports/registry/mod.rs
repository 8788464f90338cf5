//! Backend Registry System
//!
//! Defines the auto-registration infrastructure for cache backends.
//! Uses the `linkme` crate for compile-time registration of backends
//! that are copied into explicit [`BackendRegistry`] instances at runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Backend Registration Flow                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Provider defines:  #[linkme::distributed_slice(CACHE_BACKENDS)]
//! │                        static ENTRY: CacheBackendEntry = ...    │
//! │                              ↓                                  │
//! │  2. Registry seeds:    BackendRegistry::with_registered_backends│
//! │                              ↓                                  │
//! │  3. Caller may add:    registry.register("custom", ctor)        │
//! │                              ↓                                  │
//! │  4. Config selects:    "type = redis" → RemoteScalarCache       │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod cache;

pub use cache::{
    BackendConstructor, BackendFuture, BackendRegistry, CACHE_BACKENDS, CacheBackendEntry,
    list_cache_backends,
};
