//! Session State
//!
//! The persisted login state shared by the HTTP client, the navigation guard
//! and the auth service.
//!
//! ## Layout
//!
//! - **Store**: string key-value persistence ([`MemoryStore`], [`FileStore`])
//! - **Context**: [`SessionContext`], typed access to the `token` and `user`
//!   entries, handed explicitly to every component that needs it
//!
//! Authentication state is derived from token presence only. Nothing here
//! talks to the backend; see `AuthService::verify_session` for a verified probe.

mod error;
mod store;

pub use error::{SessionError, SessionResult};
pub use store::{FileStore, MemoryStore, SessionStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key of the serialized user profile
pub const USER_KEY: &str = "user";

/// Profile of the logged-in user as returned by `auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Fields the client does not interpret, kept so the stored copy is complete
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Point-in-time copy of the stored session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

/// Typed handle over a [`SessionStore`]
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Context over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Current bearer token, if one is stored
    ///
    /// A store that cannot be read counts as holding no token.
    pub fn token(&self) -> Option<String> {
        match self.store.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> SessionResult<()> {
        self.store.set_item(TOKEN_KEY, token)
    }

    /// Stored user profile
    ///
    /// An unreadable or undecodable entry is logged and reported as absent.
    pub fn user(&self) -> Option<User> {
        let raw = match self.store.get_item(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session user");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Stored user is not valid JSON");
                None
            }
        }
    }

    pub fn set_user(&self, user: &User) -> SessionResult<()> {
        let raw = serde_json::to_string(user)?;
        self.store.set_item(USER_KEY, &raw)
    }

    /// Token presence check, not validated against the backend
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Remove both the token and the user profile
    pub fn clear(&self) -> SessionResult<()> {
        self.store.remove_item(TOKEN_KEY)?;
        self.store.remove_item(USER_KEY)?;
        tracing::debug!("Session cleared");
        Ok(())
    }

    pub fn snapshot(&self) -> Session {
        Session {
            token: self.token(),
            user: self.user(),
        }
    }
}
