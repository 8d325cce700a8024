//! Application error types.

use thiserror::Error;

use crate::transport::TransportError;

/// Application-level errors for snoolink.
#[derive(Error, Debug)]
pub enum AppError {
    // Construction errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid URL: {url}")]
    InvalidReference { url: String },

    // Attribute errors
    #[error("Submission has no attribute '{name}'")]
    AttributeNotFound { name: String },

    #[error("Attribute '{name}' has an unexpected shape: {reason}")]
    AttributeType { name: String, reason: String },

    // Remote errors
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Malformed reply from '{path}': {reason}")]
    MalformedReply { path: String, reason: String },

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// Shorthand for a [`AppError::MalformedReply`].
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        AppError::MalformedReply {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
