//! Errors shared by the store, identity and configuration layers
//!
//! Upstream API failures have their own type in `larder-api`; only the soft
//! wrappers there turn them into empty results.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// SQLite failure while reading or writing a user's documents
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable or malformed `config.toml`
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected form or credential input; the message is shown to the user as is
    #[error("{0}")]
    InvalidInput(String),

    /// A stored document could not be encoded or decoded
    #[error("Stored data error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_displays_message_only() {
        let err = Error::InvalidInput("Please enter a title".to_string());
        assert_eq!(err.to_string(), "Please enter a title");
    }
}
