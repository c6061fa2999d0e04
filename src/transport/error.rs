//! Transport error types

use thiserror::Error;

/// Errors that can occur when calling the chat endpoint
#[derive(Error, Debug)]
pub enum TransportError {
    /// Endpoint answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    /// Response body carried an `error` field
    #[error("Chat endpoint error: {0}")]
    Remote(String),

    /// 2xx response without a reply
    #[error("Response did not contain a reply")]
    MissingReply,

    /// 2xx response whose body is not the expected JSON
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Endpoint could not be reached
    #[error("Chat endpoint unavailable")]
    Unavailable,

    /// Any other request or decoding failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Coarse classification of a [`TransportError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Non-2xx HTTP status
    Status,
    /// The body reported an error or lacked a reply
    Payload,
    /// The exchange itself failed
    Network,
}

impl TransportError {
    pub fn kind(&self) -> TransportErrorKind {
        match self {
            TransportError::Status { .. } => TransportErrorKind::Status,
            TransportError::Remote(_)
            | TransportError::MissingReply
            | TransportError::Malformed(_) => TransportErrorKind::Payload,
            TransportError::Timeout | TransportError::Unavailable | TransportError::Request(_) => {
                TransportErrorKind::Network
            }
        }
    }

    /// HTTP status code, for status failures
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Unavailable
        } else {
            TransportError::Request(err)
        }
    }

    pub(crate) fn from_body(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Malformed(err.to_string())
        } else {
            TransportError::from_send(err)
        }
    }
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportErrorKind::Status => write!(f, "status"),
            TransportErrorKind::Payload => write!(f, "payload"),
            TransportErrorKind::Network => write!(f, "network"),
        }
    }
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
