//! Error types for Viewkeep

use thiserror::Error;

/// Result type alias for Viewkeep operations
pub type ViewkeepResult<T> = Result<T, ViewkeepError>;

/// Main error type for Viewkeep
#[derive(Error, Debug, Clone)]
pub enum ViewkeepError {
    /// Settings store errors (failed writes surface here)
    #[error("Store error: {0}")]
    Store(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

impl ViewkeepError {
    /// Create a new store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a new generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

impl From<std::io::Error> for ViewkeepError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for ViewkeepError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}
