//! Backend REST client
//!
//! Thin request-issuing layer shared by every service wrapper. It resolves
//! paths against the configured base address, labels JSON bodies with the
//! JSON content type and attaches the bearer token held by the [`SessionContext`].

use super::error::{ClientError, ClientResult};
use crate::config::ApiConfig;
use crate::session::SessionContext;
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Request, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query pairs appended to the URL
    pub query: Vec<(String, String)>,
    /// Extra headers; these replace defaults with the same name
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Build query pairs from a serializable filter struct
    ///
    /// Top-level fields become pairs; `null` fields are skipped.
    pub fn with_query<T: Serialize>(params: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(params).map_err(ClientError::Encode)?;

        let query = match value {
            serde_json::Value::Object(map) => map
                .into_iter()
                .filter_map(|(key, value)| match value {
                    serde_json::Value::Null => None,
                    serde_json::Value::String(s) => Some((key, s)),
                    other => Some((key, other.to_string())),
                })
                .collect(),
            serde_json::Value::Null => Vec::new(),
            _ => {
                return Err(ClientError::Encode(serde::ser::Error::custom(
                    "query parameters must serialize to an object",
                )))
            }
        };

        Ok(Self {
            query,
            headers: Vec::new(),
        })
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Request body
pub enum Payload {
    Empty,
    /// Pre-encoded JSON document
    Json(Vec<u8>),
    Multipart(Form),
}

impl Payload {
    pub fn json<B: Serialize + ?Sized>(body: &B) -> ClientResult<Self> {
        serde_json::to_vec(body)
            .map(Payload::Json)
            .map_err(ClientError::Encode)
    }
}

/// Shared HTTP client; clones share the connection pool and the session
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: SessionContext,
}

impl HttpClient {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig, session: SessionContext) -> ClientResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(config.with_credentials)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Resolve `path` against the base address
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Build a request with the default headers and session auth applied
    pub fn build(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        options: &RequestOptions,
    ) -> ClientResult<Request> {
        let raw = self.url(path);
        let url = Url::parse(&raw).map_err(|e| ClientError::Url {
            url: raw.clone(),
            message: e.to_string(),
        })?;

        let mut builder = self.client.request(method, url);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }

        let is_json = matches!(payload, Payload::Json(_));
        builder = match payload {
            Payload::Empty => builder,
            Payload::Json(bytes) => builder.body(bytes),
            Payload::Multipart(form) => builder.multipart(form),
        };

        let mut request = builder.build()?;
        let headers = request.headers_mut();

        if is_json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }

        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClientError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ClientError::InvalidHeader(format!("{}: {}", name, value)))?;
            headers.insert(name, value);
        }

        if let Some(token) = self.session.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::InvalidHeader("Authorization: Bearer <token>".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(request)
    }

    /// Execute a built request and decode the JSON body
    ///
    /// Non-2xx statuses become [`ClientError::Status`] carrying the raw body.
    /// An empty success body decodes as JSON `null`.
    pub async fn send<T: DeserializeOwned>(&self, request: Request) -> ClientResult<T> {
        let method = request.method().clone();
        let url = request.url().clone();

        tracing::debug!(
            method = %method,
            url = %url,
            auth = request.headers().contains_key(AUTHORIZATION),
            "Dispatching request"
        );

        let response = self.client.execute(request).await.map_err(|e| {
            tracing::warn!(method = %method, url = %url, error = %e, "Request failed");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            tracing::warn!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                "Backend rejected request"
            );
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(serde_json::Value::Null).map_err(ClientError::Decode)
        } else {
            serde_json::from_slice(&bytes).map_err(ClientError::Decode)
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        let request = self.build(Method::GET, path, Payload::Empty, &options)?;
        self.send(request).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, options: RequestOptions) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build(Method::POST, path, Payload::json(body)?, &options)?;
        self.send(request).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, options: RequestOptions) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build(Method::PUT, path, Payload::json(body)?, &options)?;
        self.send(request).await
    }

    /// POST a multipart form (file uploads)
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        options: RequestOptions,
    ) -> ClientResult<T> {
        let request = self.build(Method::POST, path, Payload::Multipart(form), &options)?;
        self.send(request).await
    }
}

/// Join a request path onto a base address
///
/// Absolute `http(s)://` paths are used as-is. Otherwise exactly one `/`
/// separates the base from the path, whatever slashes either side carries.
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.is_empty() {
        return base.to_string();
    }

    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_token(token: Option<&str>) -> HttpClient {
        let session = SessionContext::in_memory();
        if let Some(token) = token {
            session.set_token(token).unwrap();
        }
        HttpClient::new(&ApiConfig::default(), session).unwrap()
    }

    #[test]
    fn test_join_url() {
        let base = "http://127.0.0.1:8000/";
        assert_eq!(join_url(base, "auth/login"), "http://127.0.0.1:8000/auth/login");
        assert_eq!(
            join_url(base, "/code-exercises"),
            "http://127.0.0.1:8000/code-exercises"
        );
        assert_eq!(
            join_url("http://127.0.0.1:8000", "quizzes/upcoming"),
            "http://127.0.0.1:8000/quizzes/upcoming"
        );
        assert_eq!(
            join_url(base, "https://other.example/x"),
            "https://other.example/x"
        );
        assert_eq!(join_url(base, ""), base);
    }

    #[test]
    fn test_url_resolves_against_base() {
        let client = client_with_token(None);
        assert_eq!(client.base_url(), "http://127.0.0.1:8000/");
        assert_eq!(
            client.url("/dashboards/student_dashboard"),
            "http://127.0.0.1:8000/dashboards/student_dashboard"
        );
    }

    #[test]
    fn test_bearer_header_when_token_stored() {
        let client = client_with_token(Some("tok-123"));
        let request = client
            .build(Method::GET, "auth/me", Payload::Empty, &RequestOptions::default())
            .unwrap();

        let auth = request.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer tok-123");
        assert!(auth.is_sensitive());
        assert_eq!(request.headers().get_all(AUTHORIZATION).iter().count(), 1);
    }

    #[test]
    fn test_no_auth_header_without_token() {
        let client = client_with_token(None);
        let request = client
            .build(Method::GET, "auth/me", Payload::Empty, &RequestOptions::default())
            .unwrap();

        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_token_read_at_build_time() {
        let client = client_with_token(None);
        client.session().set_token("late").unwrap();

        let request = client
            .build(Method::GET, "/quizzes/upcoming", Payload::Empty, &RequestOptions::default())
            .unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer late"
        );
    }

    #[test]
    fn test_json_content_type_and_body() {
        let client = client_with_token(None);
        let payload = Payload::json(&serde_json::json!({"email": "a@b.c"})).unwrap();
        let request = client
            .build(Method::POST, "auth/login", payload, &RequestOptions::default())
            .unwrap();

        assert_eq!(request.url().as_str(), "http://127.0.0.1:8000/auth/login");
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"email":"a@b.c"}"#);
    }

    #[test]
    fn test_bodyless_request_has_no_content_type() {
        let client = client_with_token(Some("tok"));
        let request = client
            .build(Method::GET, "/quizzes/upcoming", Payload::Empty, &RequestOptions::default())
            .unwrap();

        assert!(request.headers().get(CONTENT_TYPE).is_none());
        assert!(request.body().is_none());
    }

    #[test]
    fn test_multipart_keeps_its_own_content_type() {
        let client = client_with_token(Some("tok"));
        let form = Form::new().text("file", "print(1)");
        let request = client
            .build(
                Method::POST,
                "/code-exercises/upload-question",
                Payload::Multipart(form),
                &RequestOptions::default(),
            )
            .unwrap();

        let content_types: Vec<_> = request.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(content_types.len(), 1);
        assert!(content_types[0]
            .to_str()
            .unwrap()
            .starts_with("multipart/form-data; boundary="));
    }

    #[test]
    fn test_query_from_filters_skips_missing_fields() {
        #[derive(Serialize)]
        struct Filters {
            difficulty: Option<String>,
            category: Option<String>,
            lecture_id: Option<i64>,
        }

        let options = RequestOptions::with_query(&Filters {
            difficulty: Some("easy".to_string()),
            category: None,
            lecture_id: Some(4),
        })
        .unwrap();

        let client = client_with_token(None);
        let request = client
            .build(Method::GET, "/code-exercises", Payload::Empty, &options)
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://127.0.0.1:8000/code-exercises?difficulty=easy&lecture_id=4"
        );
    }

    #[test]
    fn test_option_headers_replace_defaults() {
        let client = client_with_token(None);
        let options = RequestOptions::default().header("Content-Type", "text/plain");
        let payload = Payload::json("print(1)").unwrap();
        let request = client
            .build(Method::POST, "/x", payload, &options)
            .unwrap();

        assert_eq!(request.headers().get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(request.headers().get(CONTENT_TYPE).unwrap(), "text/plain");
    }

    #[test]
    fn test_invalid_header_rejected() {
        let client = client_with_token(None);
        let options = RequestOptions::default().header("bad header", "x");
        let err = client
            .build(Method::GET, "/x", Payload::Empty, &options)
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidHeader(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        let client = HttpClient::new(&config, SessionContext::in_memory()).unwrap();
        let err = client
            .build(Method::GET, "/x", Payload::Empty, &RequestOptions::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::Url { .. }));
    }
}
