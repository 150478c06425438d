use std::io;

use skincheck_core::flow::FlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] skincheck_core::Error),
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Image not found: {0}")]
    ImageNotFound(String),
    #[error(
        "Sign-in is not configured. Run `skincheck config init --firebase-api-key <KEY>` or set SKINCHECK_FIREBASE_API_KEY."
    )]
    AuthNotConfigured,
}
