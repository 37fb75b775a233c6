//! Gateway REST API Client
//!
//! HTTP client for the gateway's authentication, user and health endpoints.
//! Every request is built through [`ApiClient::request`], which attaches the
//! session's bearer token when one is stored at that moment.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{HealthStatus, LoginForm, NewUser, TokenResponse, User};
use super::error::{ApiError, ApiResult};
use super::GatewayApi;
use crate::session::Session;

/// Gateway REST API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
    session: Session,
}

/// Configuration for the gateway client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the gateway (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout; `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: None,
        }
    }
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl ApiClient {
    /// Create a client that reads its bearer token from `session`
    pub fn new(config: ApiClientConfig, session: Session) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::Request)?;

        Ok(Self {
            client,
            config,
            session,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Session the client reads its token from
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Start a request to `path`, with the bearer token attached if present
    ///
    /// The token is read here, at construction time, not when the request is
    /// sent.
    pub fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let builder = self.client.request(method, self.url(path));
        match self.session.token()? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    /// Send a prepared request and decode a JSON success body
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let request = builder.build().map_err(ApiError::Request)?;
        let request_id = uuid::Uuid::new_v4();
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let authenticated = request.headers().contains_key(reqwest::header::AUTHORIZATION);

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            authenticated,
            "Sending gateway request"
        );

        let response = self.client.execute(request).await.map_err(|e| {
            let err = ApiError::from(e);
            tracing::debug!(request_id = %request_id, error = %err, "Gateway request failed");
            err
        })?;

        tracing::debug!(
            request_id = %request_id,
            status = response.status().as_u16(),
            "Gateway responded"
        );

        decode(response).await
    }

    /// Exchange username and password for a bearer token
    ///
    /// The token is returned to the caller; it is not stored in the session.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        let builder = self
            .request(Method::POST, "/token")?
            .form(&LoginForm { username, password });
        self.send(builder).await
    }

    /// Create a new user account
    pub async fn register(&self, new_user: &NewUser) -> ApiResult<User> {
        let builder = self.request(Method::POST, "/users/")?.json(new_user);
        self.send(builder).await
    }

    /// Fetch the profile of the user the session token belongs to
    pub async fn current_user(&self) -> ApiResult<User> {
        let builder = self.request(Method::GET, "/users/me")?;
        self.send(builder).await
    }

    /// Probe gateway liveness
    pub async fn check_health(&self) -> ApiResult<HealthStatus> {
        let builder = self.request(Method::GET, "/health")?;
        self.send(builder).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_status(status, &body));
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl GatewayApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        ApiClient::login(self, username, password).await
    }

    async fn register(&self, new_user: &NewUser) -> ApiResult<User> {
        ApiClient::register(self, new_user).await
    }

    async fn current_user(&self) -> ApiResult<User> {
        ApiClient::current_user(self).await
    }

    async fn check_health(&self) -> ApiResult<HealthStatus> {
        ApiClient::check_health(self).await
    }
}
