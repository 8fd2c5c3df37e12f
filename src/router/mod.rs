//! Client Routing
//!
//! Static route table, the pre-navigation guard and a [`Router`] that applies
//! the guard to navigation requests.
//!
//! ## Guard rules
//!
//! Evaluated against the session's token-presence check:
//!
//! 1. authenticated and heading to `/login` or `/` → redirect to `/dashboard`
//! 2. route requires auth and not authenticated → redirect to `/login`
//! 3. otherwise allow
//!
//! Redirect targets are guarded again; a chain longer than
//! [`MAX_REDIRECTS`] is reported as [`RouterError::RedirectLoop`].

mod guard;
mod routes;

pub use guard::{Decision, Guard};
pub use routes::{
    normalize_path, Layout, RouteDescriptor, RouteMeta, RouteTable, View, DASHBOARD_PATH,
    LOGIN_PATH, ROOT_PATH,
};

use crate::session::SessionContext;
use thiserror::Error;

/// Redirect hops followed before giving up
pub const MAX_REDIRECTS: usize = 5;

/// Result of a completed navigation
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    Arrived {
        route: RouteDescriptor,
        /// Originally requested path when the guard redirected
        redirected_from: Option<String>,
    },
    NotFound {
        path: String,
    },
}

impl Navigation {
    /// Path the navigation ended on
    pub fn path(&self) -> &str {
        match self {
            Navigation::Arrived { route, .. } => route.path,
            Navigation::NotFound { path } => path,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouterError {
    #[error("Redirect loop while navigating to {from}: {chain:?}")]
    RedirectLoop { from: String, chain: Vec<String> },
}

pub type RouterResult<T> = Result<T, RouterError>;

/// Navigation state over a route table
#[derive(Debug)]
pub struct Router {
    table: RouteTable,
    guard: Guard,
    session: SessionContext,
    current: Option<String>,
}

impl Router {
    pub fn new(table: RouteTable, session: SessionContext) -> Self {
        Self {
            table,
            guard: Guard::new(),
            session,
            current: None,
        }
    }

    /// Router over the default route table
    pub fn with_default_routes(session: SessionContext) -> Self {
        Self::new(RouteTable::default(), session)
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Path of the last completed navigation
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Evaluate the guard for `path` without navigating
    pub fn check(&self, path: &str) -> Decision {
        self.guard
            .check(path, self.table.resolve(path), self.session.is_authenticated())
    }

    /// Navigate to `path`, following guard redirects
    pub fn navigate(&mut self, path: &str) -> RouterResult<Navigation> {
        let requested = normalize_path(path);
        let mut target = requested.clone();
        let mut chain = vec![requested.clone()];

        loop {
            match self.check(&target) {
                Decision::Allow => break,
                Decision::Redirect(next) => {
                    tracing::info!(from = %target, to = %next, "Navigation redirected");
                    if chain.len() > MAX_REDIRECTS {
                        return Err(RouterError::RedirectLoop {
                            from: requested,
                            chain,
                        });
                    }
                    chain.push(next.clone());
                    target = next;
                }
            }
        }

        let redirected_from = (target != requested).then_some(requested);
        let navigation = match self.table.resolve(&target) {
            Some(route) => Navigation::Arrived {
                route: route.clone(),
                redirected_from,
            },
            None => Navigation::NotFound {
                path: target.clone(),
            },
        };

        tracing::debug!(path = %target, "Navigation complete");
        self.current = Some(target);
        Ok(navigation)
    }
}
