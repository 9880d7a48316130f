//! Error types for the WHMCS client
//!
//! The platform reports business failures inside a `200 OK` JSON envelope
//! (`"result": "error"`), so the most important variant here is
//! [`Error::Remote`]. Everything else is local: configuration, transport,
//! validation, or decoding.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a WHMCS client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the WHMCS client.
#[derive(Debug, Error)]
pub enum Error {
    /// The platform rejected the call and reported a message.
    ///
    /// `message` is the platform text verbatim; callers match on it to tell
    /// expected business rejections apart from real failures.
    #[error("{message}")]
    Remote {
        /// Remote procedure that was invoked
        action: String,
        /// Error message as reported by the platform
        message: String,
    },

    /// Non-success HTTP status without a platform error envelope.
    #[error("HTTP error (status {status}): {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// Failed to deserialize the platform response.
    #[error("Failed to parse API response: {0}")]
    ResponseValidation(String),

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Request rejected locally before transmission.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Line-item flattening or base64 failure.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Build a remote error for the given action.
    pub fn remote(action: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Remote {
            action: action.into(),
            message: message.into(),
        }
    }

    /// Build an error from a non-success HTTP status and body.
    ///
    /// Bodies longer than 512 bytes are cut so log lines stay readable.
    pub fn from_status(status: u16, body: &str) -> Self {
        let mut body = body.trim().to_string();
        if body.len() > 512 {
            let mut cut = 512;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
            body.push('…');
        }
        Error::Http { status, body }
    }

    /// Whether the platform itself reported this error.
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote { .. })
    }

    /// Platform message, if this is a remote error.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Error::Remote { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Remote action this error belongs to, if it is a remote error.
    pub fn remote_action(&self) -> Option<&str> {
        match self {
            Error::Remote { action, .. } => Some(action),
            _ => None,
        }
    }

    /// Whether the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}

impl From<derive_builder::UninitializedFieldError> for Error {
    fn from(error: derive_builder::UninitializedFieldError) -> Self {
        Error::InvalidRequest(format!("missing required field `{}`", error.field_name()))
    }
}
