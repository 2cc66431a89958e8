//! Readiness Monitor Core Library
//!
//! Data model, feed ingestion and configuration for the validator
//! readiness monitor

pub mod config;
pub mod error;
pub mod snapshot;
pub mod transaction;
pub mod validator;

// Re-export main types
pub use config::{MonitorConfig, Window};
pub use error::{ConfigError, SnapshotError};
pub use snapshot::Snapshot;
pub use transaction::Transaction;
pub use validator::Validator;
