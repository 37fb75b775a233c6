//! Login View
//!
//! Exchanges credentials for a token, stores it in the session and moves on
//! to the dashboard.

use std::sync::Arc;

use super::navigation::{Navigator, DASHBOARD_ROUTE};
use crate::api::{ApiResult, GatewayApi, TokenResponse};
use crate::session::Session;

/// Login form view-model
pub struct LoginView {
    api: Arc<dyn GatewayApi>,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl LoginView {
    pub fn new(api: Arc<dyn GatewayApi>, session: Session, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            session,
            navigator,
        }
    }

    /// Submit the login form
    ///
    /// On success the issued `access_token` is stored verbatim and the view
    /// navigates to the dashboard. On failure the session is left untouched.
    pub async fn submit(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        let token = self.api.login(username, password).await.map_err(|e| {
            tracing::info!(username = %username, reason = %e.kind(), "Login rejected");
            e
        })?;

        self.session.set_token(&token.access_token)?;
        tracing::info!(username = %username, "Logged in");

        self.navigator.navigate(DASHBOARD_ROUTE);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorKind;
    use crate::session::MemoryStore;
    use crate::testing::{Outcome, ScriptedGateway, TEST_PASSWORD, TEST_TOKEN, TEST_USERNAME};
    use crate::views::HistoryNavigator;

    #[tokio::test]
    async fn test_successful_login_stores_token() {
        let session = Session::new(Arc::new(MemoryStore::new()));
        let navigator = Arc::new(HistoryNavigator::new());
        let view = LoginView::new(
            Arc::new(ScriptedGateway::healthy()),
            session.clone(),
            navigator.clone(),
        );

        let token = view.submit(TEST_USERNAME, TEST_PASSWORD).await.unwrap();

        assert_eq!(token.access_token, TEST_TOKEN);
        assert_eq!(session.token().unwrap().as_deref(), Some(TEST_TOKEN));
        assert_eq!(navigator.history(), vec![DASHBOARD_ROUTE]);
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_session() {
        let session = Session::new(Arc::new(MemoryStore::new()));
        session.set_token("previous").unwrap();
        let navigator = Arc::new(HistoryNavigator::new());
        let mut api = ScriptedGateway::healthy();
        api.login = Outcome::Unauthorized;
        let view = LoginView::new(Arc::new(api), session.clone(), navigator.clone());

        let err = view.submit(TEST_USERNAME, "wrong").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(session.token().unwrap().as_deref(), Some("previous"));
        assert!(navigator.history().is_empty());
    }
}
