//! Error types for Gatewatch.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Pattern errors
    #[error("Invalid blocking pattern [{pattern}]: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // Configuration errors
    #[error("Blocker config not found for job: {0}")]
    ConfigNotFound(String),

    #[error("Config store error: {0}")]
    ConfigStore(String),

    // Snapshot errors
    #[error("Snapshot provider error: {0}")]
    Snapshot(String),

    // Infrastructure errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
