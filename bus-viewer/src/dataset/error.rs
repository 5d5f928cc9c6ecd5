//! Dataset loading error types.

use std::time::Duration;

use crate::domain::DomainError;

/// Reasons a dataset source could not be used.
///
/// None of these reach the rest of the viewer: the loader logs them and
/// substitutes the embedded routes.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Source answered with a non-success status
    #[error("dataset request returned status {status}")]
    Status { status: u16 },

    /// Reading a local dataset file failed
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Document is not JSON of the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Document parsed but breaks the route/stop invariants
    #[error("invalid dataset: {0}")]
    Invalid(#[from] DomainError),

    /// Source did not answer in time
    #[error("dataset fetch timed out after {0:?}")]
    Timeout(Duration),
}
