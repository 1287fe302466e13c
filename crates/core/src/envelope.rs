//! Uniform response wrapper shared by the HTTP server and its clients.

use serde::{Deserialize, Serialize};

/// `{ success, message?, data? }`; absent fields are omitted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            timestamp: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<()> {
    /// A failure envelope carrying only a message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            timestamp: None,
        }
    }

    /// A success envelope with a message and timestamp but no payload.
    #[must_use]
    pub fn status(message: impl Into<String>, timestamp: String) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            timestamp: Some(timestamp),
        }
    }
}
