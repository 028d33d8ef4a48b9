//! Errors raised while talking to the content provider.
//!
//! These stay inside the crate boundary: `ContentProvider` implementations
//! log them and report "no recipes" / "no image" instead.

use thiserror::Error;

/// Errors that can occur when interacting with the Gemini API
#[derive(Error, Debug)]
pub enum ChefClientError {
    #[error("{var} environment variable not set")]
    MissingApiKey { var: &'static str },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gemini response had no text content")]
    EmptyResponse,

    #[error("Gemini response had no inline image data")]
    NoImage,

    #[error("Failed to decode Gemini payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ChefClientError>;
