//! # open-sdk cache - Domain Layer
//!
//! Core types shared by every layer of the cache toolkit: the error type,
//! value objects, and the ports that backends implement.
//!
//! ## Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | [`CacheBackend`](ports::providers::CacheBackend) | Scalar get/set/del/exists contract every backend satisfies |
//! | [`RemoteStore`](ports::providers::RemoteStore) | Remote key-value store with sorted-set primitives |

/// Domain constants
pub mod constants;
/// Error handling types
pub mod error;
/// Port traits implemented by providers
pub mod ports;
/// Value objects
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::providers::{CacheBackend, MemberSwap, RemoteStore, ScoreBound};
pub use value_objects::{CacheConfig, CacheValue, Message};
