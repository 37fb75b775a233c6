//! Dashboard View
//!
//! Loads the signed-in user's profile and the gateway health, in that order,
//! and renders both. Any failure sends the user to the login page without
//! showing partial data.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --mount--> Loading --both ok--> Loaded
//!                    |
//!                    +--any error--> Redirecting (navigates to /login)
//! ```
//!
//! `logout` clears the token and navigates to `/login` from any state.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::navigation::{Navigator, LOGIN_ROUTE};
use crate::api::{ApiResult, ErrorKind, GatewayApi, HealthStatus, User};
use crate::session::{Session, SessionResult};

/// Current state of a dashboard mount
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashboardState {
    /// Not mounted yet
    #[default]
    Idle,
    /// Fetching profile and health
    Loading,
    /// Both fetches succeeded
    Loaded { user: User, health: HealthStatus },
    /// A fetch failed; the view left for the login page
    Redirecting { reason: ErrorKind },
}

impl DashboardState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, DashboardState::Loaded { .. })
    }

    pub fn is_redirecting(&self) -> bool {
        matches!(self, DashboardState::Redirecting { .. })
    }
}

/// Dashboard view-model
pub struct Dashboard {
    api: Arc<dyn GatewayApi>,
    session: Session,
    navigator: Arc<dyn Navigator>,
    state: RwLock<DashboardState>,
    mounted: AtomicBool,
}

impl Dashboard {
    pub fn new(api: Arc<dyn GatewayApi>, session: Session, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            session,
            navigator,
            state: RwLock::new(DashboardState::Idle),
            mounted: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Mount the view and run the load sequence
    ///
    /// Returns the state the mount settled in. If the view is unmounted while
    /// a fetch is in flight, the late result is dropped and the state is left
    /// as it was.
    pub async fn mount(&self) -> DashboardState {
        self.mounted.store(true, Ordering::SeqCst);
        *self.state.write().await = DashboardState::Loading;
        tracing::debug!("Dashboard loading");

        let outcome = self.load().await;

        // Checked only once the guard is held; awaiting the lock can yield
        let mut state = self.state.write().await;
        if !self.is_mounted() {
            tracing::debug!("Dashboard unmounted during load, discarding result");
            return state.clone();
        }

        match outcome {
            Ok(Some((user, health))) => {
                tracing::info!(username = %user.username, status = %health.status, "Dashboard loaded");
                *state = DashboardState::Loaded { user, health };
                state.clone()
            }
            // Unmounted between the two fetches
            Ok(None) => state.clone(),
            Err(err) => {
                let reason = err.kind();
                // Every failure is treated as "not signed in"
                tracing::info!(reason = %reason, error = %err, "Dashboard load failed, redirecting to login");
                *state = DashboardState::Redirecting { reason };
                let redirecting = state.clone();
                drop(state);
                // Whoever flips `mounted` off owns the navigation
                if self.mounted.swap(false, Ordering::SeqCst) {
                    self.navigator.navigate(LOGIN_ROUTE);
                }
                redirecting
            }
        }
    }

    /// Profile first; health only once the profile succeeded
    async fn load(&self) -> ApiResult<Option<(User, HealthStatus)>> {
        let user = self.api.current_user().await?;
        if !self.is_mounted() {
            return Ok(None);
        }
        let health = self.api.check_health().await?;
        Ok(Some((user, health)))
    }

    /// Detach the view; in-flight results will be discarded
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    /// Clear the stored token and go to the login page
    ///
    /// Navigation happens even if the store could not be cleared; the store
    /// error is returned afterwards.
    pub fn logout(&self) -> SessionResult<()> {
        let cleared = self.session.clear();
        if let Err(e) = &cleared {
            tracing::warn!(error = %e, "Failed to clear session token on logout");
        }
        self.leave(LOGIN_ROUTE);
        cleared
    }

    fn leave(&self, route: &str) {
        self.unmount();
        self.navigator.navigate(route);
    }

    /// Render the page as text
    ///
    /// Panels are only shown once both fetches succeeded.
    pub async fn render(&self) -> String {
        render_state(&self.state().await)
    }
}

/// Text rendering of a dashboard state
pub fn render_state(state: &DashboardState) -> String {
    let mut out = String::from("Dashboard\n");

    match state {
        DashboardState::Idle => {}
        DashboardState::Loading => out.push_str("\nLoading...\n"),
        DashboardState::Loaded { user, health } => {
            let _ = write!(
                out,
                "\nUser Information\n  Email: {}\n  Username: {}\n",
                user.email, user.username
            );
            let _ = write!(
                out,
                "\nSystem Health\n  Status: {}\n  Timestamp: {}\n",
                health.status,
                health.display_timestamp()
            );
        }
        DashboardState::Redirecting { .. } => {
            let _ = writeln!(out, "\nRedirecting to {}", LOGIN_ROUTE);
        }
    }

    out.push_str("\n[Logout]\n");
    out
}
