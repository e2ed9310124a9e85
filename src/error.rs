//! Error types for intent translation.

use thiserror::Error;

/// The main error type for intent-sql operations.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The value handed over is not a usable intent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The intent declares an action the translator does not implement.
    #[error("Unsupported action: '{0}'. Expected: create, find, findOne, update, or destroy")]
    UnsupportedAction(String),

    /// Failed to parse the intent syntax.
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranslateError {
    /// Create a parse error at the given position.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result type alias for intent-sql operations.
pub type TranslateResult<T> = Result<T, TranslateError>;
