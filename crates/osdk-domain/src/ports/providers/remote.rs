//! Remote Store Port
//!
//! The subset of a remote key-value store the toolkit relies on: plain
//! string keys with optional expiry, and sorted sets (members ordered by a
//! numeric score) for the recipient mailboxes.

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// One end of a score range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreBound {
    /// Below every score
    NegInfinity,
    /// Above every score
    PosInfinity,
    /// The given score, included in the range
    Inclusive(f64),
}

impl ScoreBound {
    /// Inclusive bound at a unix timestamp
    #[allow(clippy::cast_precision_loss)]
    pub fn at(timestamp: i64) -> Self {
        Self::Inclusive(timestamp as f64)
    }

    /// Whether `score` lies at or above this bound when used as a minimum
    pub fn admits_from_below(&self, score: f64) -> bool {
        match self {
            Self::NegInfinity => true,
            Self::PosInfinity => false,
            Self::Inclusive(min) => score >= *min,
        }
    }

    /// Whether `score` lies at or below this bound when used as a maximum
    pub fn admits_from_above(&self, score: f64) -> bool {
        match self {
            Self::NegInfinity => false,
            Self::PosInfinity => true,
            Self::Inclusive(max) => score <= *max,
        }
    }
}

/// Renders the bound as a Redis range argument
impl fmt::Display for ScoreBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegInfinity => f.write_str("-inf"),
            Self::PosInfinity => f.write_str("+inf"),
            Self::Inclusive(score) => write!(f, "{score}"),
        }
    }
}

/// Replacement of one sorted-set member by another at a given score
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSwap {
    /// Member to remove
    pub from: String,
    /// Member added in its place, only if `from` was removed
    pub to: String,
    /// Score of the added member
    pub score: f64,
}

impl MemberSwap {
    /// Swap `from` for `to` at `score`
    pub fn new(from: impl Into<String>, to: impl Into<String>, score: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            score,
        }
    }
}

/// Remote Store Port
///
/// Every call may block on network I/O. The deadline is fixed per store
/// handle rather than passed on each call: it comes from
/// `CacheConfig::timeout_ms` at construction and applies to every
/// operation (`RedisStore::with_timeout` derives a handle with a different
/// one). Expiry is reported as `Error::Timeout`.
#[async_trait]
pub trait RemoteStore: Send + Sync + fmt::Debug {
    /// Liveness check
    async fn ping(&self) -> Result<()>;

    /// Get a string value; `None` when the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a string value, expiring after `ttl` when given
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Delete a key of any type, reporting whether it existed
    async fn del(&self, key: &str) -> Result<bool>;

    /// Check whether a key of any type exists
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Add `member` with `score` to the sorted set at `key`
    async fn zadd(&self, key: &str, member: &str, score: f64) -> Result<()>;

    /// Members with `min <= score <= max`, ascending by score
    async fn zrange_by_score(&self, key: &str, min: ScoreBound, max: ScoreBound)
    -> Result<Vec<String>>;

    /// Remove members with `min <= score <= max`, returning how many were removed
    async fn zrem_range_by_score(&self, key: &str, min: ScoreBound, max: ScoreBound)
    -> Result<u64>;

    /// Atomically apply each swap whose original member is still present
    ///
    /// A swap whose `from` member is gone (removed by a concurrent prune or
    /// delete) is skipped and its `to` member is not added. Returns how many
    /// swaps were applied.
    async fn zswap(&self, key: &str, swaps: &[MemberSwap]) -> Result<u64>;

    /// Name of the store implementation
    fn store_name(&self) -> &str;
}
