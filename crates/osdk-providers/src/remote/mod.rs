//! Remote Store Implementations
//!
//! | Store | Description |
//! |-------|-------------|
//! | [`InMemoryStore`] | In-process emulation, for tests and single-process setups |
//! | [`RedisStore`] | Redis server through a multiplexed connection manager |

pub mod memory;
#[cfg(feature = "cache-redis")]
pub mod redis;

pub use memory::InMemoryStore;
#[cfg(feature = "cache-redis")]
pub use redis::RedisStore;
