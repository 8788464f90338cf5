//! Redis remote store
//!
//! [`RemoteStore`] over a Redis `ConnectionManager`, which multiplexes one
//! connection between every clone of the store and reconnects on failure.
//!
//! ## Deadlines
//!
//! Every command runs under `tokio::time::timeout`. Expiry is reported as
//! `Error::Timeout`, connection-level failures as `Error::BackendUnavailable`,
//! replies that do not convert (such as non-UTF-8 text) as `Error::Decode`,
//! and anything else Redis rejects as `Error::Infrastructure`.
//!
//! ## Member swaps
//!
//! `zswap` runs as one Lua script, so each read copy is added only when its
//! original was still present at the moment of removal.
//!
//! ## Example
//!
//! ```ignore
//! use osdk_providers::remote::RedisStore;
//!
//! let config = CacheConfig::new("MainRedis", "redis").with_address("localhost", 6379);
//! let store = RedisStore::connect(&config).await?;
//! ```

use async_trait::async_trait;
use osdk_domain::constants::REDIS_BACKEND_TYPE;
use osdk_domain::error::{Error, Result};
use osdk_domain::ports::providers::{MemberSwap, RemoteStore, ScoreBound};
use osdk_domain::value_objects::CacheConfig;
use redis::aio::ConnectionManager;
use redis::{Client, ErrorKind, FromRedisValue, RedisError, RedisResult, Script};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Swaps each `(from, to, score)` triple in ARGV whose `from` is still a member
const ZSWAP_SCRIPT: &str = r"
local applied = 0
for i = 1, #ARGV, 3 do
    if redis.call('ZREM', KEYS[1], ARGV[i]) == 1 then
        redis.call('ZADD', KEYS[1], ARGV[i + 2], ARGV[i + 1])
        applied = applied + 1
    end
end
return applied
";

/// Redis-backed remote store
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    address: String,
    timeout: Duration,
}

impl RedisStore {
    /// Connect to the Redis server described by `config` and ping it
    ///
    /// Fails with `BackendUnavailable` when the server cannot be reached or
    /// does not answer within the configured deadline.
    pub async fn connect(config: &CacheConfig) -> Result<Self> {
        let address = display_address(config);
        let timeout = config.timeout();
        let client = Client::open(connection_url(config).as_str()).map_err(|e| {
            Error::configuration_with_source(
                format!("Invalid Redis address for cache '{}': {address}", config.key),
                e,
            )
        })?;

        let connection =
            match tokio::time::timeout(timeout, client.get_connection_manager()).await {
                Ok(Ok(connection)) => connection,
                Ok(Err(e)) => {
                    warn!(address = %address, error = %e, "Redis connection failed");
                    return Err(Error::backend_unavailable_with_source(
                        format!("Redis connection to {address} failed"),
                        e,
                    ));
                }
                Err(_) => {
                    warn!(address = %address, ?timeout, "Redis connection timed out");
                    return Err(Error::backend_unavailable(format!(
                        "Redis connection to {address} timed out after {timeout:?}"
                    )));
                }
            };

        let store = Self {
            connection,
            address,
            timeout,
        };

        store.ping().await.map_err(|e| {
            warn!(address = %store.address, error = %e, "Redis PING failed");
            Error::backend_unavailable_with_source(
                format!("Redis at {} did not answer PING", store.address),
                e,
            )
        })?;

        info!(address = %store.address, cache = %config.key, "Connected to Redis");
        Ok(store)
    }

    /// Replace the per-operation deadline
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-operation deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Server address (`host:port/db`, without credentials)
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Raw Redis connection for commands beyond the [`RemoteStore`] port
    pub fn connection(&self) -> ConnectionManager {
        self.connection.clone()
    }

    async fn query<T: FromRedisValue>(&self, operation: &str, cmd: &redis::Cmd) -> Result<T> {
        let mut connection = self.connection.clone();
        self.within_deadline(operation, cmd.query_async::<T>(&mut connection))
            .await
    }

    async fn within_deadline<T>(
        &self,
        operation: &str,
        call: impl Future<Output = RedisResult<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(map_redis_error(operation, self.timeout, e)),
            Err(_) => Err(Error::timeout(operation, self.timeout)),
        }
    }
}

#[async_trait]
impl RemoteStore for RedisStore {
    async fn ping(&self) -> Result<()> {
        self.query::<String>("PING", &redis::cmd("PING")).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.query("GET", redis::cmd("GET").arg(key)).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl {
            let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);
            cmd.arg("PX").arg(millis);
        }
        self.query("SET", &cmd).await
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let removed: u64 = self.query("DEL", redis::cmd("DEL").arg(key)).await?;
        Ok(removed > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let count: u64 = self.query("EXISTS", redis::cmd("EXISTS").arg(key)).await?;
        Ok(count > 0)
    }

    async fn zadd(&self, key: &str, member: &str, score: f64) -> Result<()> {
        let _: u64 = self
            .query("ZADD", redis::cmd("ZADD").arg(key).arg(score).arg(member))
            .await?;
        Ok(())
    }

    async fn zrange_by_score(
        &self,
        key: &str,
        min: ScoreBound,
        max: ScoreBound,
    ) -> Result<Vec<String>> {
        self.query(
            "ZRANGEBYSCORE",
            redis::cmd("ZRANGEBYSCORE")
                .arg(key)
                .arg(min.to_string())
                .arg(max.to_string()),
        )
        .await
    }

    async fn zrem_range_by_score(
        &self,
        key: &str,
        min: ScoreBound,
        max: ScoreBound,
    ) -> Result<u64> {
        self.query(
            "ZREMRANGEBYSCORE",
            redis::cmd("ZREMRANGEBYSCORE")
                .arg(key)
                .arg(min.to_string())
                .arg(max.to_string()),
        )
        .await
    }

    async fn zswap(&self, key: &str, swaps: &[MemberSwap]) -> Result<u64> {
        if swaps.is_empty() {
            return Ok(0);
        }
        let script = Script::new(ZSWAP_SCRIPT);
        let mut invocation = script.key(key);
        for swap in swaps {
            invocation
                .arg(swap.from.as_str())
                .arg(swap.to.as_str())
                .arg(swap.score);
        }

        let mut connection = self.connection.clone();
        self.within_deadline("EVALSHA", invocation.invoke_async::<u64>(&mut connection))
            .await
    }

    fn store_name(&self) -> &str {
        REDIS_BACKEND_TYPE
    }
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("address", &self.address)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn map_redis_error(operation: &str, timeout: Duration, e: RedisError) -> Error {
    if e.is_timeout() {
        Error::timeout(operation, timeout)
    } else if matches!(e.kind(), ErrorKind::Parse | ErrorKind::UnexpectedReturnType) {
        Error::decode_with_source(format!("Redis {operation} reply could not be decoded"), e)
    } else if e.is_connection_refusal() || e.is_connection_dropped() || e.is_io_error() {
        Error::backend_unavailable_with_source(format!("Redis {operation} failed"), e)
    } else {
        Error::infrastructure_with_source(format!("Redis {operation} failed"), e)
    }
}

fn host(config: &CacheConfig) -> &str {
    if config.host.is_empty() {
        "127.0.0.1"
    } else {
        &config.host
    }
}

fn display_address(config: &CacheConfig) -> String {
    format!("{}:{}/{}", host(config), config.port, config.database_index)
}

fn connection_url(config: &CacheConfig) -> String {
    match config.effective_credential() {
        Some(password) => format!(
            "redis://:{}@{}",
            urlencoding::encode(password),
            display_address(config)
        ),
        None => format!("redis://{}", display_address(config)),
    }
}
