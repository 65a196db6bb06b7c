//! Error types for tally-store

use thiserror::Error;

/// Store error type
#[derive(Debug, Error)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Stored value could not be converted
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Error from the pricing/aggregation core
    #[error(transparent)]
    Core(#[from] tally_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
