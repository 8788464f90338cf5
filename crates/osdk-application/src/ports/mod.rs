//! Application ports

/// Backend registry
pub mod registry;

pub use registry::{BackendRegistry, CacheBackendEntry, CACHE_BACKENDS};
