//! Error types for the populate engine.

use std::time::Duration;
use thiserror::Error;

/// Why a single fixture could not be created.
///
/// These never abort a run: the task that hit one logs it and ends.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Could not encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Admission gate closed")]
    GateClosed,

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Could not send the creation request: {0}")]
    Transport(String),

    #[error("Unexpected status code {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Could not extract ID from creation response: {reason} (body: {body})")]
    MissingId { reason: String, body: String },
}

impl DispatchError {
    /// Whether another attempt could succeed without creating a duplicate.
    ///
    /// A response without an id may still have created the resource, and a
    /// payload that failed to encode will fail again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DispatchError::Timeout(_) | DispatchError::Transport(_) | DispatchError::Rejected { .. }
        )
    }
}

/// Failures that prevent a run from starting.
#[derive(Error, Debug)]
pub enum PopulatorError {
    #[error("Could not build tenant identity: {0}")]
    Identity(#[from] serde_json::Error),

    #[error("Could not write report to {path}: {source}")]
    Report {
        path: String,
        source: std::io::Error,
    },
}
