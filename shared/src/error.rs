//! Error types for the BiteFinder Lambda.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving a request.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing, empty, or malformed request parameter
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP method other than POST
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Failure reported by, or while reaching, the places provider
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::MethodNotAllowed(_) => 405,
            _ => 500,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upstream(err.to_string())
    }
}
