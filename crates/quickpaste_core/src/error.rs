//! Application error types for catalog loading, validation, and submission.
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Language catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Language catalog is not ready")]
    CatalogNotReady,

    #[error("Body Required")]
    BodyRequired,

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Invalid expiry: {0}")]
    InvalidExpiry(String),

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Paste already submitted")]
    AlreadySubmitted,

    #[error("Backend worker is unavailable")]
    BackendUnavailable,
}
