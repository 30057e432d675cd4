//! Error types for fallible construction and strict validation

use thiserror::Error;

/// Errors raised while building a [`SchemaRegistry`](crate::schema::SchemaRegistry)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A command was registered under an empty name
    #[error("command key must not be empty")]
    EmptyKey,

    /// Command names must be usable as the key half of a filter token
    #[error("invalid command key '{key}': keys cannot contain whitespace, quotes, ':' or operator characters")]
    InvalidKey { key: String },

    /// Two commands share a name (compared case-insensitively)
    #[error("duplicate command key: {0}")]
    DuplicateKey(String),

    /// Enum commands need at least one allowed value
    #[error("enum command '{key}' declares no allowed values")]
    MissingValues { key: String },

    /// Schema configuration could not be decoded
    #[error("invalid schema configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Config(err.to_string())
    }
}

/// Errors raised by strict filter validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A token references a key the registry does not know
    #[error("unknown filter key '{key}' at position {position}")]
    UnknownKey { key: String, position: usize },
}
