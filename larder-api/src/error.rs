//! Upstream API error kinds

use thiserror::Error;

/// Why an upstream request produced no data
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body was not the expected JSON shape
    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// Result type for upstream operations
pub type ApiResult<T> = Result<T, ApiError>;
