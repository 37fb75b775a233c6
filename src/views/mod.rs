//! Views
//!
//! View-models for the console's pages. Each view talks to the gateway through
//! [`GatewayApi`](crate::api::GatewayApi) and moves between pages through a
//! [`Navigator`].
//!
//! - [`Dashboard`]: profile + health, redirects to login on failure
//! - [`LoginView`]: credentials in, token stored, on to the dashboard
//! - [`RegisterView`]: account creation, then on to login

mod dashboard;
mod login;
mod navigation;
mod register;

pub use dashboard::{render_state, Dashboard, DashboardState};
pub use login::LoginView;
pub use navigation::{HistoryNavigator, Navigator, DASHBOARD_ROUTE, LOGIN_ROUTE};
pub use register::RegisterView;
