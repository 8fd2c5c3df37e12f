//! Authentication service
//!
//! Login writes the bearer token into the session; `auth/me` refreshes the
//! stored user profile. Logout clears both entries locally; the backend keeps
//! no server-side session to end.

use super::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::http::{ClientResult, HttpClient, RequestOptions};
use crate::session::User;

#[derive(Clone, Debug)]
pub struct AuthService {
    http: HttpClient,
}

impl AuthService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Exchange credentials for a bearer token and store it
    ///
    /// Nothing is written to the session unless the backend answers 2xx.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self
            .http
            .post("auth/login", &body, RequestOptions::default())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Login failed");
                e
            })?;

        self.http.session().set_token(&response.access_token)?;
        tracing::info!(token_type = %response.token_type, "Logged in");

        Ok(response)
    }

    /// Fetch the current user profile and store it
    pub async fn get_user(&self) -> ClientResult<User> {
        let user: User = self.http.get("auth/me", RequestOptions::default()).await?;
        self.http.session().set_user(&user)?;
        tracing::debug!(user_id = user.id, "Stored user profile");
        Ok(user)
    }

    /// Create an account; does not log in
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: &str,
    ) -> ClientResult<RegisterResponse> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            role: role.to_string(),
        };

        self.http
            .post("auth/register", &body, RequestOptions::default())
            .await
    }

    /// Drop the stored token and user
    pub async fn logout(&self) -> ClientResult<()> {
        self.http.session().clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Probe the backend to confirm the stored token is still accepted
    ///
    /// Returns `false` without a request when no token is stored. A 401 clears
    /// the stale session and returns `false`; other failures propagate.
    pub async fn verify_session(&self) -> ClientResult<bool> {
        if !self.http.session().is_authenticated() {
            return Ok(false);
        }

        match self.get_user().await {
            Ok(_) => Ok(true),
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("Stored token rejected by backend, clearing session");
                self.http.session().clear()?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
