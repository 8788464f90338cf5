//! Domain layer constants

/// Key prefix of a recipient mailbox on the remote store
pub const MAILBOX_KEY_PREFIX: &str = "message:";

/// Default per-operation deadline for remote stores, in milliseconds
pub const REMOTE_DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Default Redis port
pub const REDIS_DEFAULT_PORT: u16 = 6379;

/// Backend type name of the process-local TTL cache
pub const LOCAL_BACKEND_TYPE: &str = "local";

/// Backend type name of the Redis-backed scalar cache
pub const REDIS_BACKEND_TYPE: &str = "redis";

/// Stored text of a `true` boolean
pub const BOOL_TRUE_TEXT: &str = "1";

/// Stored text of a `false` boolean
pub const BOOL_FALSE_TEXT: &str = "0";
