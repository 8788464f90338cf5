//! Structured logging with tracing
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` (overridable
//! through `OSDK_LOG`), a plain or JSON stdout layer and, when
//! `file_output` is set, a daily-rolling file layer written from a
//! background thread.
//!
//! A file named `logs/osdk.log` rolls as `logs/osdk.<date>.log`.

use crate::constants::{DEFAULT_LOG_FILE_STEM, LOG_FILTER_ENV};
use osdk_domain::error::{Error, Result};
use std::path::Path;
use tracing::{Level, debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

pub use crate::config::LoggingConfig;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the background file writer alive
///
/// Dropping it flushes and stops file output; hold it for the lifetime of
/// the process.
#[must_use = "file logging stops when the guard is dropped"]
#[derive(Debug)]
pub struct LoggingGuard {
    file_writer: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Whether a file layer was installed
    pub fn writes_file(&self) -> bool {
        self.file_writer.is_some()
    }
}

/// Initialize logging with the provided configuration
///
/// Fails with `Error::Configuration` if the level does not parse, the log
/// file cannot be opened or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers = vec![output_layer(config.json_format, std::io::stdout, true)];
    let file_writer = match &config.file_output {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(rolling_appender(path)?);
            layers.push(output_layer(config.json_format, writer, false));
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| Error::configuration_with_source("Failed to install logger", e))?;

    info!(
        %level,
        json = config.json_format,
        file = ?config.file_output,
        "Logging initialized"
    );
    Ok(LoggingGuard { file_writer })
}

fn output_layer<W>(json: bool, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_thread_ids(true);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

fn rolling_appender(path: &Path) -> Result<RollingFileAppender> {
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_LOG_FILE_STEM);

    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(stem);
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        builder = builder.filename_suffix(extension);
    }
    builder.build(directory).map_err(|e| {
        Error::configuration_with_source(format!("Cannot open log file {}", path.display()), e)
    })
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}

/// Log health check result
pub fn log_health_check(component: &str, healthy: bool, details: Option<&str>) {
    if healthy {
        debug!(component = component, "Health check passed");
    } else {
        error!(
            component = component,
            details = details.unwrap_or("Unknown failure"),
            "Health check failed"
        );
    }
}
