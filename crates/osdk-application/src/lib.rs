//! # open-sdk cache - Application Layer
//!
//! Orchestration on top of the domain ports:
//!
//! - [`BackendRegistry`] builds cache backends from configuration records,
//!   seeded from the compile-time [`CACHE_BACKENDS`] slice.
//! - [`OrderedMailbox`] stores timestamped per-recipient messages on a
//!   remote store's sorted sets.

/// Domain services
pub mod domain_services;
/// Application ports (registry)
pub mod ports;

pub use domain_services::OrderedMailbox;
pub use ports::registry::{BackendRegistry, CACHE_BACKENDS, CacheBackendEntry, list_cache_backends};
