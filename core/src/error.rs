//! Snapshot and configuration error types

use thiserror::Error;

/// Reasons a validator snapshot is rejected as malformed.
///
/// Any of these aborts processing of the whole snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field `{field}` at {path}")]
    MissingField { path: String, field: &'static str },

    #[error("Invalid field `{field}` at {path}: {reason}")]
    InvalidField {
        path: String,
        field: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
