//! Register View

use std::sync::Arc;

use super::navigation::{Navigator, LOGIN_ROUTE};
use crate::api::{ApiResult, GatewayApi, NewUser, User};

/// Registration form view-model
///
/// A successful registration sends the user to the login page; it does not
/// sign them in.
pub struct RegisterView {
    api: Arc<dyn GatewayApi>,
    navigator: Arc<dyn Navigator>,
}

impl RegisterView {
    pub fn new(api: Arc<dyn GatewayApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, navigator }
    }

    pub async fn submit(&self, new_user: &NewUser) -> ApiResult<User> {
        match self.api.register(new_user).await {
            Ok(user) => {
                tracing::info!(username = %user.username, "Registered user");
                self.navigator.navigate(LOGIN_ROUTE);
                Ok(user)
            }
            Err(e) => {
                tracing::info!(username = %new_user.username, reason = %e.kind(), "Registration rejected");
                Err(e)
            }
        }
    }
}
