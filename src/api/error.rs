//! API Error Types
//!
//! Classifies gateway failures by HTTP status and transport condition so
//! callers can tell an expired session from an unreachable service.

use crate::session::SessionError;
use reqwest::StatusCode;
use thiserror::Error;

use super::dto::ErrorDetail;

/// Errors returned by the gateway client
#[derive(Error, Debug)]
pub enum ApiError {
    /// Credentials rejected or session token missing/invalid (401/403)
    #[error("Authentication failed: {message}")]
    Auth { status: u16, message: String },

    /// Request payload rejected (422, or 400 that is not a duplicate)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource already exists (409, or 400 reporting a duplicate)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Gateway unreachable or the request timed out
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request could not be built or sent for a non-network reason
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Any other non-success status
    #[error("Unexpected response {status}: {message}")]
    Unexpected { status: u16, message: String },

    /// Success status but the body did not match the expected shape
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    /// Token storage could not be read
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Coarse error category
///
/// Stable discriminant for callers that branch on the kind of failure
/// without caring about the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Auth,
    Validation,
    Conflict,
    Network,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Auth => "auth",
            ErrorKind::Validation => "validation",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Network => "network",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ApiError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Auth { .. } => ErrorKind::Auth,
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::Conflict(_) => ErrorKind::Conflict,
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Request(_)
            | ApiError::Unexpected { .. }
            | ApiError::InvalidResponse(_)
            | ApiError::Session(_) => ErrorKind::Unknown,
        }
    }

    /// Build an error from a non-success status and its raw body
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorDetail>(body)
            .map(|detail| detail.message())
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                } else {
                    body.trim().to_string()
                }
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth {
                status: status.as_u16(),
                message,
            },
            StatusCode::CONFLICT => ApiError::Conflict(message),
            // The gateway reports duplicate registrations as 400
            StatusCode::BAD_REQUEST if is_duplicate(&message) => ApiError::Conflict(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation(message)
            }
            _ => ApiError::Unexpected {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            ApiError::Network(err)
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else if err.is_request() || err.is_body() {
            // Connection dropped mid-exchange
            ApiError::Network(err)
        } else {
            ApiError::Request(err)
        }
    }
}

fn is_duplicate(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("already registered") || lower.contains("already exists")
}

/// Result type for gateway client operations
pub type ApiResult<T> = Result<T, ApiError>;
