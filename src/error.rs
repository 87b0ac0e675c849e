//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
///
/// Every failure is normalized here — callers never see a raw transport
/// error without classification.
#[derive(Error, Debug)]
pub enum HttpError {
    /// Transport-level failure: DNS, timeout, connection refused.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response with a structured `{error, message}` body.
    /// `kind` is the backend's machine-readable error code.
    #[error("API error {status} [{kind}]: {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    /// Non-2xx response whose body could not be parsed as JSON.
    #[error("Undecodable error response (status {status})")]
    Decode { status: u16 },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

// ─── ErrorInfo ───────────────────────────────────────────────────────────────

/// Coarse error classification for display decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport failure or unreadable response — the backend was not heard.
    Network,
    /// The backend answered with a structured error.
    Api,
    RateLimited,
    /// Client-side input rejected before any network call.
    Validation,
}

/// A cloneable `{kind, message}` projection of an error.
///
/// Poll snapshots hold this instead of the full error: snapshots travel
/// through `watch` channels and must be `Clone`, which `reqwest::Error`
/// is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<&HttpError> for ErrorInfo {
    fn from(err: &HttpError) -> Self {
        match err {
            HttpError::Transport(_) | HttpError::Decode { .. } => {
                ErrorInfo::new(ErrorKind::Network, "Failed to connect to the API")
            }
            HttpError::MaxRetriesExceeded { .. } => {
                ErrorInfo::new(ErrorKind::Network, err.to_string())
            }
            HttpError::Api { message, .. } => ErrorInfo::new(ErrorKind::Api, message.clone()),
            HttpError::RateLimited { .. } => {
                ErrorInfo::new(ErrorKind::RateLimited, "Too many requests")
            }
        }
    }
}

impl From<&SdkError> for ErrorInfo {
    fn from(err: &SdkError) -> Self {
        match err {
            SdkError::Http(e) => e.into(),
            SdkError::Validation(msg) => ErrorInfo::new(ErrorKind::Validation, msg.clone()),
            SdkError::Serde(e) => ErrorInfo::new(ErrorKind::Network, e.to_string()),
            SdkError::Other(msg) => ErrorInfo::new(ErrorKind::Network, msg.clone()),
        }
    }
}
