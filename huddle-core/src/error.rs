//! Error types for huddle.

use thiserror::Error;

/// Errors that can occur in huddle operations.
#[derive(Error, Debug)]
pub enum HuddleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HuddleError {
    /// Stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            HuddleError::Config(_) => "config",
            HuddleError::Network(_) => "network",
            HuddleError::Api { .. } => "api",
            HuddleError::Validation(_) => "validation",
            HuddleError::UnknownTimezone(_) => "format",
            HuddleError::NotFound(_) => "not_found",
            HuddleError::Io(_) => "io",
            HuddleError::Serialization(_) => "serialization",
        }
    }
}

/// Result type alias for huddle operations.
pub type HuddleResult<T> = Result<T, HuddleError>;
