//! Navigation guard

use super::routes::{normalize_path, RouteDescriptor, DASHBOARD_PATH, LOGIN_PATH, ROOT_PATH};

/// Outcome of one guard evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(String),
}

/// Synchronous pre-navigation check
///
/// `authenticated` is the session's token-presence test; the guard never
/// validates the token against the backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Guard;

impl Guard {
    pub fn new() -> Self {
        Self
    }

    /// Decide whether navigation to `path` proceeds
    ///
    /// `route` is the resolved descriptor, `None` for paths outside the table.
    pub fn check(&self, path: &str, route: Option<&RouteDescriptor>, authenticated: bool) -> Decision {
        let path = normalize_path(path);

        if authenticated && (path == LOGIN_PATH || path == ROOT_PATH) {
            return Decision::Redirect(DASHBOARD_PATH.to_string());
        }

        if route.map_or(false, RouteDescriptor::requires_auth) && !authenticated {
            return Decision::Redirect(LOGIN_PATH.to_string());
        }

        Decision::Allow
    }
}
