//! # open-sdk cache - Infrastructure Layer
//!
//! Cross-cutting technical concerns around the cache toolkit.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML/env configuration with validation |
//! | [`logging`] | Structured logging with tracing |
//! | [`cache`] | Named cache manager and periodic expiry sweep |
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`constants`] | Infrastructure constants |
//!
//! ## Example
//!
//! ```ignore
//! use osdk_application::BackendRegistry;
//! use osdk_infrastructure::{cache::{CacheManager, CleanupDriver}, config::ConfigLoader, logging};
//!
//! let config = ConfigLoader::new().load()?;
//! let _logging = logging::init_logging(&config.logging)?;
//!
//! let registry = BackendRegistry::with_registered_backends();
//! let manager = Arc::new(CacheManager::from_configs(&registry, &config.caches).await?);
//! let driver = CleanupDriver::spawn(Arc::clone(&manager), config.cleanup.interval())?;
//! ```

// Force linkme registration of every backend in osdk-providers
extern crate osdk_providers;

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use error_ext::ErrorContext;
