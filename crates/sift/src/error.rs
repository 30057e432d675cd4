//! Common error types for the sift host.

use sift_core::{FilterError, SchemaError};
use thiserror::Error;

/// Common error type for sift host operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Schema table rejected
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Filter expression rejected under a strict unknown-key policy
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using sift Error.
pub type Result<T> = std::result::Result<T, Error>;
