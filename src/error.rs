//! Error types for pedia-bot.

use std::time::Duration;

use crate::jsonpath::LeafKind;

/// Top-level error type for the bot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Server error: {0}")]
    Server(String),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Path expression evaluation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: LeafKind,
        found: &'static str,
    },
}

/// Errors from the outbound article fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Article request failed: {0}")]
    Request(String),

    #[error("Article request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Article endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Article response is not valid JSON: {0}")]
    Decode(String),
}

/// Any failure between a matched command and a composed reply.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Path resolution failed: {0}")]
    Path(#[from] PathError),
}
