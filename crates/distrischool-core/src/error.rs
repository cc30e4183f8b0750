//! Error types for DistriSchool API operations.
//!
//! Every failure surfaced by the client falls into one of a small set of
//! kinds: the request never completed ([`Error::Transport`]), the server
//! answered with a non-success status ([`Error::Http`]), or the body could
//! not be decoded ([`Error::Decode`]). Configuration and address problems get
//! their own variants so callers can tell them apart from network trouble.

use std::sync::Arc;
use thiserror::Error;

/// Main error type for DistriSchool API operations.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// The request never reached the server or the response never came back.
    #[error("Transport error: {message}")]
    Transport {
        /// Human-readable description of the failure
        message: String,
        /// Underlying transport error
        #[source]
        source: Arc<reqwest::Error>,
    },

    /// The server answered with a non-success status code.
    #[error("HTTP error! status: {status}")]
    Http {
        /// Numeric HTTP status code
        status: u16,
        /// Response body, if any was returned
        message: String,
    },

    /// The response claimed to be JSON but could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The target address could not be built from the base URL and endpoint.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(String),

    /// A caller-supplied header name or value is not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Runtime configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Specialized result type for DistriSchool API operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "TRANSPORT_ERROR",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::Encode(_) => "ENCODE_ERROR",
            Self::InvalidHeader(_) => "INVALID_HEADER",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Returns the HTTP status code when the server rejected the request.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the server answered `404 Not Found`.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// Returns true if the request failed below the HTTP layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };

        Self::Transport {
            message,
            source: Arc::new(err),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
