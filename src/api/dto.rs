//! Data Transfer Objects
//!
//! Request and response bodies exchanged with the gateway.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================
// Authentication
// ============================================

/// Form fields for `POST /token`
#[derive(Debug, Serialize)]
pub(crate) struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from `POST /token`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Bearer token to attach to subsequent requests
    pub access_token: String,
    /// Token scheme, "bearer" for this gateway
    pub token_type: String,
    /// Any other fields the gateway includes
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// ============================================
// Users
// ============================================

/// Request body for `POST /users/`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

/// User profile returned by `GET /users/me` and `POST /users/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub email: String,
    pub username: String,
}

// ============================================
// Health
// ============================================

/// Response from `GET /health`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HealthStatus {
    /// Overall status reported by the gateway (e.g. "healthy")
    pub status: String,
    /// Unix timestamp in seconds, possibly fractional
    pub timestamp: f64,
}

impl HealthStatus {
    /// The reported timestamp as a UTC datetime
    ///
    /// `None` if the value is not a representable instant.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        if !self.timestamp.is_finite() {
            return None;
        }
        let secs = self.timestamp.floor();
        let nanos = ((self.timestamp - secs) * 1e9).round().min(999_999_999.0) as u32;
        Utc.timestamp_opt(secs as i64, nanos).single()
    }

    /// Timestamp formatted in the local timezone for display
    pub fn display_timestamp(&self) -> String {
        self.observed_at()
            .map(|dt| {
                dt.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| self.timestamp.to_string())
    }
}

// ============================================
// Errors
// ============================================

/// Error body produced by the gateway: `{"detail": ...}`
///
/// `detail` is a string for most errors and a list of field errors for
/// request validation failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// Flatten the detail into a single human-readable message
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    let msg = item
                        .get("msg")
                        .and_then(|m| m.as_str())
                        .unwrap_or("invalid value");
                    let field = item
                        .get("loc")
                        .and_then(|loc| loc.as_array())
                        .and_then(|loc| loc.last())
                        .and_then(|f| f.as_str());
                    match field {
                        Some(field) => format!("{}: {}", field, msg),
                        None => msg.to_string(),
                    }
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}
