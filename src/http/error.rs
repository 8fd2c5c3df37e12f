//! HTTP client error types

use thiserror::Error;

/// Errors surfaced by [`super::HttpClient`]
///
/// Service wrappers return these unchanged; no domain-specific translation
/// happens on the way to the caller.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, TLS or protocol failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(serde_json::Error),

    /// The request body or query could not be encoded
    #[error("Failed to encode request: {0}")]
    Encode(serde_json::Error),

    /// A header name or value is not valid HTTP
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The joined request URL does not parse
    #[error("Invalid URL {url}: {message}")]
    Url { url: String, message: String },

    /// Persisting a login result to the session store failed
    #[error("Session error: {0}")]
    Session(#[from] crate::session::SessionError),
}

impl ClientError {
    /// HTTP status of a rejected request
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The backend rejected the bearer token
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
