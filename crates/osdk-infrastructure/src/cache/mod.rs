//! Cache lifecycle
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CacheManager`] | Named caches built from configuration |
//! | [`CleanupDriver`] | Background task driving expiry sweeps |

pub mod cleanup;
pub mod manager;

pub use cleanup::CleanupDriver;
pub use manager::{CacheHealth, CacheManager};
