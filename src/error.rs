//! # Error Types
//!
//! This module defines error types used throughout the asciify library.
//!
//! Only mapping loads and the hosts can fail. Conversion and template
//! expansion are total functions and never return an error.

use thiserror::Error;

/// Main error type for asciify operations
#[derive(Debug, Error)]
pub enum AsciifyError {
    /// Mapping file bytes are not valid UTF-8
    #[error("Mapping file is not UTF-8 encoded: {source_name}")]
    Encoding {
        /// File name (or `<memory>`) the bytes came from
        source_name: String,
    },

    /// Requested mapping is not present in the mapping directory
    #[error("Mapping not found: {0}")]
    MappingNotFound(String),

    /// Mapping directory could not be created or scanned
    #[error("Mapping directory error: {0}")]
    MappingDir(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// Command-line options that cannot be combined
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AsciifyError {
    /// Whether this error came from a mapping file failing to decode.
    pub fn is_encoding(&self) -> bool {
        matches!(self, AsciifyError::Encoding { .. })
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AsciifyError>;
