//! Error types for skincheck-core

use thiserror::Error;

use crate::auth::AuthError;
use crate::mail::MailError;
use crate::validation::ValidationError;

/// Result type alias using skincheck-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in skincheck-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Local form validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Identity provider error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Mail composer error
    #[error(transparent)]
    Mail(#[from] MailError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Image decode/encode error
    #[error("Image error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
