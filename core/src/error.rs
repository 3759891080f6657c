//! Error types for the list sync client.
//!
//! # Design
//! `Network` and `Server` are surfaced to the user as non-fatal notices;
//! `Decode` only means "this one response was garbage" and is logged, leaving
//! the display in its last-good state. `Encode` is kept for completeness: a
//! JSON string payload cannot realistically fail to serialize.

use thiserror::Error;

/// Errors produced while issuing or resolving a network operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// No response was received (connection refused, reset, DNS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// A response arrived with a failing status.
    #[error("server returned HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl SyncError {
    /// Text to show the user, or `None` when the error is log-only.
    pub fn notice(&self) -> Option<String> {
        match self {
            SyncError::Network(_) => {
                Some("could not reach the server; submit again to retry".to_string())
            }
            SyncError::Server { status, .. } => Some(format!("the server rejected the request (HTTP {status})")),
            SyncError::Decode(_) | SyncError::Encode(_) => None,
        }
    }
}
