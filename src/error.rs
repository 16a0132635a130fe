//! Error types for dsvxml

use std::io;
use thiserror::Error;

/// Main error type for dsvxml operations
#[derive(Debug, Error)]
pub enum CodecError {
    /// IO error from an underlying source or sink
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed XML markup. Terminal for the reader that produced it.
    #[error("XML parse error at byte {position}: {message}")]
    XmlParse { position: u64, message: String },

    /// Entity that cannot be serialized (attributes on character data, empty name, ...)
    #[error("Invalid entity: {0}")]
    InvalidEntity(String),
}

/// Result type alias for dsvxml operations
pub type Result<T> = std::result::Result<T, CodecError>;
