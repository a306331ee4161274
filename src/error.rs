// cw_seeder/src/error.rs
// Defines custom error types for the cw_seeder module.

use thiserror::Error;

#[derive(Debug, Error,)]
pub enum SeederError {
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String, },
    #[error("Failed to decode payload from {url}: {message}")]
    Decode { url: String, message: String, },
    #[error("Validation failed for field '{field}' (value: {value}): {message}")]
    Validation {
        field:   String,
        value:   String,
        message: String,
    },
    #[error("Store operation failed on collection '{collection}' ({unapplied} operations not applied): {message}")]
    Store {
        collection: String,
        unapplied:  u64,
        message:    String,
    },
    #[error("Failed to connect to database: {0}")]
    Connection(String,),
    #[error("Database driver error: {0}")]
    Database(#[from] mongodb::error::Error,),
    #[error("Invalid configuration: {0}")]
    Configuration(String,),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error,),
    #[error("Other error: {0}")]
    Other(String,),
}

impl SeederError {
    /// Validation error for a single named field.
    pub fn validation(
        field: impl Into<String,>,
        value: impl Into<String,>,
        message: impl Into<String,>,
    ) -> Self {
        SeederError::Validation {
            field:   field.into(),
            value:   value.into(),
            message: message.into(),
        }
    }
}

pub type Result<T,> = std::result::Result<T, SeederError,>;
