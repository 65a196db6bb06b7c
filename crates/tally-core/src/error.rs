//! Error types for tally-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Caller supplied values outside the accepted domain (e.g. negative token counts)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Price table could not be parsed or failed validation
    #[error("invalid price table: {0}")]
    PriceTable(String),

    /// Price table file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
