//! Domain Port Interfaces
//!
//! Contracts the domain depends on. Implementations live in the
//! providers crate.

/// External provider ports
pub mod providers;

pub use providers::{CacheBackend, MemberSwap, RemoteStore, ScoreBound};
