//! Larder - Custom Error Types
//! Defines the error hierarchy for the store.

use std::path::PathBuf;

use thiserror::Error;

/// Custom Result type for the Larder store.
pub type Result<T> = std::result::Result<T, LarderError>;

/// Error types for the Larder store.
#[derive(Error, Debug)]
pub enum LarderError {
    /// I/O errors from file operations (load, save).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested key is not present in the store.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A query pattern matched no keys.
    #[error("no keys match pattern: {0}")]
    NoMatch(String),

    /// A value could not be encoded to JSON.
    #[error("value encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// A stored payload could not be decoded into the requested type.
    #[error("value decoding failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// Load target file does not exist.
    #[error("store file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Malformed store file: invalid JSON or a corrupt gzip stream.
    #[error("malformed store file: {0}")]
    Format(String),

    /// Save was requested but the store has no backing file configured.
    #[error("no backing file configured")]
    NoLocation,
}
