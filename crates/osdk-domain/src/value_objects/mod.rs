//! Domain Value Objects
//!
//! Immutable value objects exchanged between the registry, the backends
//! and the mailbox service.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`CacheConfig`] | Configuration record used to construct a backend |
//! | [`CacheValue`] | Typed scalar stored in a backend |
//! | [`Message`] | Timestamped mailbox message |

/// Configuration value objects
pub mod config;
/// Mailbox message value object
pub mod message;
/// Scalar cache values
pub mod value;

pub use config::CacheConfig;
pub use message::Message;
pub use value::CacheValue;
