//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | CacheBackend | Scalar cache contract (local and remote) |
//! | RemoteStore | Remote key-value store with sorted sets |

/// Cache backend port
pub mod cache;
/// Remote store port
pub mod remote;

pub use cache::CacheBackend;
pub use remote::{MemberSwap, RemoteStore, ScoreBound};
