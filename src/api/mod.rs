//! Gateway API
//!
//! Client side of the Intelligent API Gateway's REST interface.
//!
//! # Endpoints
//!
//! ## Authentication
//! - `POST /token` - Exchange form-encoded credentials for a bearer token
//! - `POST /users/` - Register a new user
//! - `GET /users/me` - Profile of the authenticated user
//!
//! ## System
//! - `GET /health` - Liveness probe with status and timestamp
//!
//! # Authorization
//!
//! Requests carry `Authorization: Bearer <token>` if and only if the
//! [`Session`](crate::session::Session) holds a token when the request is
//! built. Responses are not intercepted: there is no retry and no refresh,
//! failures come back as [`ApiError`].

pub mod client;
pub mod dto;
pub mod error;

pub use client::{ApiClient, ApiClientConfig};
pub use dto::{HealthStatus, NewUser, TokenResponse, User};
pub use error::{ApiError, ApiResult, ErrorKind};

use async_trait::async_trait;

/// Operations the views need from the gateway
///
/// Implemented by [`ApiClient`]; views hold it as a trait object so they can
/// be driven by any implementation.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    /// Exchange credentials for a token payload
    async fn login(&self, username: &str, password: &str) -> ApiResult<TokenResponse>;

    /// Create a user account
    async fn register(&self, new_user: &NewUser) -> ApiResult<User>;

    /// Fetch the authenticated user's profile
    async fn current_user(&self) -> ApiResult<User>;

    /// Probe gateway liveness
    async fn check_health(&self) -> ApiResult<HealthStatus>;
}
