//! Error types for glorpi-llm

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// LLM error type
#[derive(Debug, Error)]
pub enum Error {
    /// Provider credential (or endpoint) missing
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// Provider answered with a non-2xx status
    #[error("{provider} api error ({status}, {code}): {message}")]
    Api {
        /// Provider id
        provider: String,
        /// Provider error code or type, `api_error` when absent
        code: String,
        /// HTTP status
        status: u16,
        /// Provider error message, or a generic fallback
        message: String,
    },

    /// Transport failure
    #[error("network error: {0}")]
    Network(String),

    /// Success status but an unreadable body
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,

    /// Provider id outside the known set
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

impl Error {
    /// Coarse classification carried on failed responses
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotConfigured(_) => ErrorKind::NotConfigured,
            Self::UnknownProvider(_) => ErrorKind::UnknownProvider,
            Self::Api { .. } => ErrorKind::ApiError,
            Self::Network(_) => ErrorKind::Network,
            Self::InvalidResponse(_) => ErrorKind::InvalidResponse,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Message suitable for showing to a user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured(msg) | Self::Network(msg) | Self::InvalidResponse(msg) => {
                msg.clone()
            }
            Self::Api { message, .. } => message.clone(),
            Self::Cancelled | Self::UnknownProvider(_) => self.to_string(),
        }
    }
}

impl From<glorpi_core::Error> for Error {
    fn from(err: glorpi_core::Error) -> Self {
        match err {
            glorpi_core::Error::UnknownProvider(id) => Self::UnknownProvider(id),
            other => Self::InvalidResponse(other.to_string()),
        }
    }
}

/// Failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing credential; nothing was sent
    NotConfigured,
    /// Provider rejected the request
    ApiError,
    /// Request never completed
    Network,
    /// Response could not be interpreted
    InvalidResponse,
    /// Cancelled by the caller; not a failure to report
    Cancelled,
    /// Provider id outside the known set
    UnknownProvider,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
