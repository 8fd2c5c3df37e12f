//! HTTP Client Wrapper
//!
//! One configured [`HttpClient`] is shared by all service wrappers. Before
//! dispatch it injects `Authorization: Bearer <token>` whenever the session
//! holds a token. There is no retry, timeout or circuit-breaking policy: any
//! transport or status failure is returned to the caller as is.

mod client;
mod error;

pub use client::{join_url, HttpClient, Payload, RequestOptions};
pub use error::{ClientError, ClientResult};
