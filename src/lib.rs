//! # Gateway Console
//!
//! Terminal front-end for the Intelligent API Gateway: an authenticated API
//! client plus the dashboard, login and register views that drive it.
//!
//! ## Features
//!
//! - **Bearer authentication**: every request carries the session token when one is stored
//! - **Typed errors**: auth, validation, conflict and network failures are distinguished
//! - **Dashboard**: sequential profile + health load with redirect-to-login on failure
//! - **Persistent session**: token kept in a small key-value file between runs
//!
//! ## Modules
//!
//! - [`api`]: HTTP client for the gateway REST API
//! - [`session`]: Token storage and the session context handed to the client
//! - [`views`]: Dashboard, login and register view-models plus navigation
//! - [`config`]: TOML + environment configuration
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gateway_console::api::{ApiClient, ApiClientConfig};
//! use gateway_console::session::{MemoryStore, Session};
//! use gateway_console::views::{Dashboard, HistoryNavigator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::new(Arc::new(MemoryStore::new()));
//!     let client = Arc::new(ApiClient::new(ApiClientConfig::default(), session.clone())?);
//!
//!     let token = client.login("testuser", "testpass123").await?;
//!     session.set_token(&token.access_token)?;
//!
//!     let navigator = Arc::new(HistoryNavigator::new());
//!     let dashboard = Dashboard::new(client, session, navigator);
//!     dashboard.mount().await;
//!
//!     println!("{}", dashboard.render().await);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{
    ApiClient, ApiClientConfig, ApiError, ApiResult, ErrorKind, GatewayApi, HealthStatus,
    NewUser, TokenResponse, User,
};

pub use session::{FileStore, MemoryStore, Session, SessionError, SessionResult, TokenStore};

pub use views::{
    Dashboard, DashboardState, HistoryNavigator, LoginView, Navigator, RegisterView,
    DASHBOARD_ROUTE, LOGIN_ROUTE,
};

pub use config::{
    ApiConfig, Config, ConfigError, ConfigLoad, LoggingConfig, SessionConfig,
};
