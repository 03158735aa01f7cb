//! Transport and decoding errors raised by the HTTP client.
use thiserror::Error;

/// Errors raised while talking to the paste backend.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
