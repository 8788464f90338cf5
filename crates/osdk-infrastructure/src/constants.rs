//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `osdk_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "osdk.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "osdk";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "OSDK";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding an `EnvFilter` directive that overrides the configured level
pub const LOG_FILTER_ENV: &str = "OSDK_LOG";

/// File name stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "osdk";

// ============================================================================
// CACHE LIFECYCLE CONSTANTS
// ============================================================================

/// Default interval between expiry sweeps, in seconds
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;
