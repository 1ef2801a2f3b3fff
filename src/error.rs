// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each variant says what went wrong and where, so the formula surface can
//! show the remote API's message verbatim while callers can still match on
//! the failure kind.

use crate::types::ValidationError;
use std::fmt;
use thiserror::Error;

/// Coda API failures classified by HTTP status.
///
/// The Coda API reports errors as `{statusCode, statusMessage, message}`;
/// the status code is the only stable discriminator, so the vocabulary is
/// built on it rather than on the free-text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodaErrorCode {
    /// The payload or query was rejected (e.g. an invalid parent page)
    BadRequest,
    /// The API token is missing, invalid or expired
    Unauthorized,
    /// The token cannot access this doc or page
    Forbidden,
    /// The doc, page or export request does not exist
    NotFound,
    /// The resource was deleted
    Gone,
    /// Too many requests, back off
    RateLimited,
    /// Coda had an internal failure
    ServerError(u16),
    /// Any other non-success status
    Other(u16),
}

impl CodaErrorCode {
    /// Classifies an HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            410 => Self::Gone,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError(status),
            other => Self::Other(other),
        }
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound | Self::Gone)
    }
}

impl fmt::Display for CodaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "bad_request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::Gone => write!(f, "gone"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ServerError(code) => write!(f, "server_error_{}", code),
            Self::Other(code) => write!(f, "http_{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("No doc is bound to this connection; select a doc first")]
    NotBound,

    #[error("Unknown formula: {0}")]
    UnknownFormula(String),

    #[error("Invalid argument for {formula}: {reason}")]
    InvalidArgument { formula: String, reason: String },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Coda API returned an error ({code}): {message}")]
    CodaService {
        code: CodaErrorCode,
        message: String,
        status: u16,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("You can only select docs you own: '{doc}' is owned by {owner}, you are signed in as {login_id}")]
    NotDocumentOwner {
        doc: String,
        owner: String,
        login_id: String,
    },

    #[error("Job {job_id} failed: {reason}")]
    JobFailed { job_id: String, reason: String },

    #[error("Job {job_id} was still pending after {attempts} status checks")]
    JobTimedOut { job_id: String, attempts: u32 },

    #[error("Pagination did not advance: {0} was already fetched")]
    PaginationLoop(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AppError {
    /// Whether the remote API reported that the target does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::CodaService { code, .. } if code.is_not_found())
    }

    pub(crate) fn invalid_argument(formula: &str, reason: impl Into<String>) -> Self {
        AppError::InvalidArgument {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::MalformedResponse(format!("invalid URL: {}", err))
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses() {
        assert_eq!(CodaErrorCode::from_http_status(404), CodaErrorCode::NotFound);
        assert_eq!(
            CodaErrorCode::from_http_status(503),
            CodaErrorCode::ServerError(503)
        );
        assert_eq!(CodaErrorCode::from_http_status(418), CodaErrorCode::Other(418));
        assert!(CodaErrorCode::Gone.is_not_found());
        assert!(!CodaErrorCode::Forbidden.is_not_found());
    }

    #[test]
    fn not_found_is_detected_on_service_errors_only() {
        let err = AppError::CodaService {
            code: CodaErrorCode::NotFound,
            message: "Page not found".to_string(),
            status: 404,
        };
        assert!(err.is_not_found());
        assert!(!AppError::NotBound.is_not_found());
        assert_eq!(
            err.to_string(),
            "Coda API returned an error (not_found): Page not found"
        );
    }
}
