//! Domain error types
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Split validation, persistence, delivery and configuration failures

use std::path::PathBuf;
use thiserror::Error;

/// Rejected user input. Always recovered by re-prompting the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("expected 2 values (height and weight), got {0}")]
    TokenCount(usize),

    #[error("'{0}' is not a non-negative number")]
    NotANumber(String),

    #[error("weight {0} gives a target that cannot be represented")]
    TargetOutOfRange(f64),

    #[error("'{0}' is not a recognized yes/no answer")]
    UnknownChoice(String),
}

/// The subscriber document could not be read or written.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to encode subscriber records: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to replace {path}: {source}")]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single outbound message was not delivered.
#[derive(Error, Debug)]
#[error("Failed to deliver message to {recipient}: {reason}")]
pub struct DeliveryError {
    pub recipient: String,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(recipient: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            recipient: recipient.into(),
            reason: reason.to_string(),
        }
    }
}

/// Startup configuration is missing or malformed. Fatal.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
