//! Error types for glorpi-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Provider identifier is not one of the known providers
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Project document could not be interpreted
    #[error("invalid project: {0}")]
    InvalidProject(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
