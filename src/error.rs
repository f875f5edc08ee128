//! Error types for the video notes core.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The key-value backend could not be read or written
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A value could not be encoded for the backend
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input from the caller (bad URL, malformed request)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Outbound HTTP lookup failed
    #[error("Request error: {0}")]
    Request(String),
}

impl From<sled::Error> for Error {
    fn from(e: sled::Error) -> Self {
        Error::BackendUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
