//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::SessionRejection;

/// Why raw question text could not be retrieved.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("question source returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted by a `QuestionSource`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("could not load the question file: {0}")]
    FetchFailed(#[from] FetchError),
    #[error("no valid questions were found in the file")]
    NoValidQuestions,
}

impl LoadError {
    /// True when the source could not be reached at all.
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::FetchFailed(_))
    }
}

/// Errors emitted while reading `QuizConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid question source url {raw:?}: {reason}")]
    InvalidSourceUrl { raw: String, reason: String },
    #[error("invalid {name} value: {raw:?}")]
    InvalidNumber { name: &'static str, raw: String },
    #[error("max questions must be > 0")]
    ZeroMaxQuestions,
}

/// Errors emitted by the missed-question exporter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("pdf rendering failed: {0}")]
    Pdf(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why the lifecycle controller refused an intent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LifecycleRejection {
    #[error("no quiz session is loaded")]
    NoSession,
    #[error("questions are still loading")]
    Loading,
    #[error(transparent)]
    Session(#[from] SessionRejection),
}
