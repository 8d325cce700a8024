//! Errors raised by transport backends.

use thiserror::Error;

/// Failure reported by a [`Transport`](crate::transport::Transport).
///
/// Opaque to the object model: it is wrapped into
/// [`AppError::Transport`](crate::error::AppError::Transport) and surfaced
/// as-is, never retried or translated.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from '{path}'")]
    Status { status: u16, path: String },

    #[error("Failed to decode reply from '{path}': {message}")]
    Decode { path: String, message: String },

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("No reply registered for {method} '{path}'")]
    NoReply { method: &'static str, path: String },
}
