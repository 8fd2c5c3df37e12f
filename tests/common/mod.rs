//! Fake LearnHub backend for integration tests
//!
//! Binds an axum app to an ephemeral local port and records every request
//! it receives so tests can assert on paths, headers and bodies.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use learnhub_client::{ApiConfig, HttpClient, Services, SessionContext};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

pub const TEST_EMAIL: &str = "ada@example.edu";
pub const VALID_PASSWORD: &str = "correct-horse";
pub const ISSUED_TOKEN: &str = "token-abc";

/// One request as seen by the fake backend
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

#[derive(Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Body the fallback answers with instead of the echo
    reply: Arc<Mutex<Option<Value>>>,
}

impl Recorder {
    /// Make unrouted paths answer 200 with `body`
    pub fn reply_with(&self, body: Value) {
        *self.reply.lock().unwrap() = Some(body);
    }

    fn reply(&self) -> Option<Value> {
        self.reply.lock().unwrap().clone()
    }

    fn push(&self, method: Method, uri: &Uri, headers: &HeaderMap, body: &Bytes) {
        let header = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };

        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: uri.path().to_string(),
            query: uri.query().map(String::from),
            authorization: header(header::AUTHORIZATION),
            content_type: header(header::CONTENT_TYPE),
            body: body.to_vec(),
        });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }

    pub fn is_empty(&self) -> bool {
        self.requests.lock().unwrap().is_empty()
    }
}

pub struct FakeBackend {
    pub base_url: String,
    pub recorder: Recorder,
    handle: JoinHandle<()>,
}

impl FakeBackend {
    /// Client over a fresh in-memory session
    pub fn services(&self) -> (Services, SessionContext) {
        let session = SessionContext::in_memory();
        (self.services_with(session.clone()), session)
    }

    pub fn services_with(&self, session: SessionContext) -> Services {
        let config = ApiConfig {
            base_url: self.base_url.clone(),
            ..ApiConfig::default()
        };
        Services::new(HttpClient::new(&config, session).unwrap())
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_backend() -> FakeBackend {
    let recorder = Recorder::default();

    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/code-exercises", get(empty_list).post(echo))
        .route("/code-exercises/submissions/user/:user_id", get(empty_list))
        .route("/code-exercises/upload-question", post(upload_question))
        .route("/code-exercises/:exercise_id/search-google", post(search_results))
        .route("/quizzes/upcoming", get(broken))
        .fallback(echo)
        .with_state(recorder.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend {
        base_url: format!("http://{}/", addr),
        recorder,
        handle,
    }
}

async fn login(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    recorder.push(method, &uri, &headers, &body);

    let credentials: Value = serde_json::from_slice(&body).unwrap_or_default();
    if credentials["email"] == TEST_EMAIL && credentials["password"] == VALID_PASSWORD {
        Json(json!({"access_token": ISSUED_TOKEN, "token_type": "bearer"})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid email or password"})),
        )
            .into_response()
    }
}

async fn me(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    recorder.push(method, &uri, &headers, &body);

    let expected = format!("Bearer {}", ISSUED_TOKEN);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());

    if authorized {
        Json(json!({
            "id": 1,
            "email": TEST_EMAIL,
            "name": "Ada Lovelace",
            "role": "student",
            "created_at": "2025-01-15T08:00:00+00:00",
            "password": "$2b$12$not-a-real-hash"
        }))
        .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Invalid token"}))).into_response()
    }
}

async fn empty_list(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    recorder.push(method, &uri, &headers, &body);
    Json(json!([]))
}

async fn upload_question(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    recorder.push(method, &uri, &headers, &body);
    Json(json!({"extracted_text": format!("{} bytes received", body.len())}))
}

async fn search_results(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    recorder.push(method, &uri, &headers, &body);
    Json(json!({
        "results": [{
            "title": "Two Sum explained",
            "link": "https://docs.example/two-sum",
            "snippet": "Hash map approach",
            "source": "docs.example"
        }]
    }))
}

async fn broken(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    recorder.push(method, &uri, &headers, &body);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"detail": "database unavailable"})),
    )
        .into_response()
}

/// Any other path answers 200 with the configured reply, or a description
/// of the request when none is set
async fn echo(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    recorder.push(method.clone(), &uri, &headers, &body);
    if let Some(reply) = recorder.reply() {
        return Json(reply);
    }

    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
    }))
}
