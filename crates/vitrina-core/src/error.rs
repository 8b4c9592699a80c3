//! Error types for the content pipeline.
//!
//! Loaders never surface errors: every [`LoadFailure`] collapses into a
//! not-found snapshot. The remaining types cover the edges of the pipeline
//! (repository transport, payload encoding, fixture loading).

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the loaders.
#[derive(Error, Debug)]
pub enum Error {
    /// Content repository failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Initial payload could not be encoded or decoded.
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Fixture document has the wrong shape.
    #[error("invalid fixtures: {0}")]
    InvalidFixtures(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure reading from a content repository.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The backend could not be reached or rejected the query.
    #[error("repository unavailable: {0}")]
    Unavailable(String),

    /// A stored record body is not valid JSON.
    #[error("invalid record body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

/// Failure encoding or decoding an [`InitialPayload`](crate::InitialPayload).
#[derive(Error, Debug)]
pub enum PayloadError {
    /// JSON (de)serialization failed.
    #[error("payload JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no payload block.
    #[error("payload block not found")]
    Missing,
}

/// Why a loader could not produce content. Never returned to callers; logged
/// and counted, then turned into a not-found snapshot.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    /// Valid params, no record.
    #[error("not found")]
    NotFound,

    /// Params fail the kind-specific shape check.
    #[error("malformed params")]
    MalformedParams,

    /// The record exists but does not decode into the kind's content.
    #[error("malformed record")]
    MalformedRecord,

    /// Transport or backend failure.
    #[error("repository unavailable")]
    RepositoryUnavailable,

    /// The load did not finish within the allotted time.
    #[error("timed out")]
    TimedOut,
}

impl LoadFailure {
    /// Stable label for metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            LoadFailure::NotFound => "not_found",
            LoadFailure::MalformedParams => "malformed_params",
            LoadFailure::MalformedRecord => "malformed_record",
            LoadFailure::RepositoryUnavailable => "repository_unavailable",
            LoadFailure::TimedOut => "timed_out",
        }
    }
}
