//! Navigation between views.

use std::sync::{Mutex, PoisonError};

/// Login page; the only redirect target for failed loads and logout
pub const LOGIN_ROUTE: &str = "/login";

/// Dashboard page; where a successful login lands
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Routing collaborator used by the views
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that records every route it is sent to
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent route, if any navigation happened
    pub fn current(&self) -> Option<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// All routes visited, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(route = %path, "Navigating");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}
