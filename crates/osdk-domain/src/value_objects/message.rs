//! Mailbox message value object

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A timestamped message stored in a recipient mailbox
///
/// `start_time` is set at insertion and doubles as the sort score of the
/// member in the recipient's sorted collection. Only `read` ever changes
/// after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message body
    pub content: String,
    /// Unix timestamp (seconds) of insertion
    pub start_time: i64,
    /// Read flag
    pub read: bool,
    /// Sender identifier
    pub from: String,
}

impl Message {
    /// Create a message
    pub fn new(
        content: impl Into<String>,
        start_time: i64,
        read: bool,
        from: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            start_time,
            read,
            from: from.into(),
        }
    }

    /// Sort score of this message
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self) -> f64 {
        self.start_time as f64
    }

    /// Copy of this message with the read flag set
    #[must_use]
    pub fn as_read(&self) -> Self {
        Self {
            read: true,
            ..self.clone()
        }
    }

    /// Serialize to the member payload stored on the remote store
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a member payload back into a message
    pub fn decode(payload: &str) -> Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| Error::decode_with_source(format!("invalid mailbox message: {payload}"), e))
    }
}
