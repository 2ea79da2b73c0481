//! Error types for the Sources API client.

use thiserror::Error;

/// Errors returned by the read-side calls (health check and catalog feeds).
///
/// Creation calls do not use this type; they report a [`crate::CreateOutcome`]
/// so a single failed fixture never becomes a hard error.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("Identity encoding error: {0}")]
    Identity(#[from] serde_json::Error),
}
