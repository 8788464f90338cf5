//! Error handling types
//!
//! Cache misses are never errors: getters report them as `Ok(None)` and
//! `del`/`exists` as `Ok(false)`. Everything in this enum is a real fault
//! that the caller must decide how to handle.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by the contextual variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the cache toolkit
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// No constructor is registered for the requested backend type
    #[error("Backend type not registered: '{backend_type}' (available: {available:?})")]
    BackendNotRegistered {
        /// The requested backend type
        backend_type: String,
        /// Backend types known to the registry
        available: Vec<String>,
    },

    /// The configured remote store could not be reached
    #[error("Backend unavailable: {message}")]
    BackendUnavailable {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// A remote operation exceeded its deadline
    #[error("Operation '{operation}' timed out after {after:?}")]
    Timeout {
        /// Name of the remote operation
        operation: String,
        /// The deadline that was exceeded
        after: Duration,
    },

    /// A stored payload could not be parsed back into the expected shape
    #[error("Decode error: {message}")]
    Decode {
        /// Description of the decode failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// A mailbox read-status rewrite failed and may have left it inconsistent
    #[error("Mailbox rewrite failed for recipient '{recipient}': {message}")]
    PartialRewrite {
        /// Recipient whose mailbox was being rewritten
        recipient: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },
}

// Registry and backend error creation methods
impl Error {
    /// Create a "backend type not registered" error
    pub fn backend_not_registered<S: Into<String>>(backend_type: S, available: Vec<String>) -> Self {
        Self::BackendNotRegistered {
            backend_type: backend_type.into(),
            available,
        }
    }

    /// Create a backend unavailable error
    pub fn backend_unavailable<S: Into<String>>(message: S) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend unavailable error with source
    pub fn backend_unavailable_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::BackendUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(operation: S, after: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            after,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

// Payload error creation methods
impl Error {
    /// Create a decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Create a decode error with source
    pub fn decode_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a partial rewrite error wrapping the fault that interrupted it
    pub fn partial_rewrite<R: Into<String>>(recipient: R, source: Error) -> Self {
        Self::PartialRewrite {
            recipient: recipient.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration and infrastructure error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification helpers
impl Error {
    /// Whether retrying the same call later may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::BackendUnavailable { .. })
    }

    /// Whether this error is a deadline expiry
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
