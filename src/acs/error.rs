use thiserror::Error;

/// Errors raised while talking to the Call Automation REST API.
#[derive(Debug, Error)]
pub enum AcsError {
    /// The connection string is missing a field or carries a malformed value
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// The request could not be signed
    #[error("Request signing failed: {0}")]
    Signing(String),

    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Call Automation API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for Call Automation operations.
pub type AcsResult<T> = Result<T, AcsError>;
