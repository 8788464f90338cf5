//! Configuration management
//!
//! Layered loading (defaults, then TOML, then `OSDK_*` environment) with
//! validation. See [`loader::ConfigLoader`].

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, CleanupConfig, LoggingConfig};
