//! HTTP client with credential injection and response normalization.
//!
//! Every call returns an [`ApiResponse`] envelope; transport failures are
//! data, not errors, so callers branch on `success` instead of unwinding.
//! Requests go out unauthenticated when no usable session exists (fail-open
//! for request construction; the route guard is the fail-closed side).

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::session::SessionStore;

/// Fixed timeout applied to every outgoing request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Standard User-Agent header for paydesk API requests.
pub const USER_AGENT: &str = concat!("paydesk/", env!("CARGO_PKG_VERSION"));

/// Normalized result of one backend call.
///
/// Exactly one of the success/failure shapes is produced per call; `status`
/// is `0` when no response was received at all.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub status: u16,
    pub data: Option<Value>,
    pub message: String,
}

impl ApiResponse {
    /// Wraps a 2xx response body.
    pub(crate) fn ok(status: u16, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("Success")
            .to_string();
        Self {
            success: true,
            status,
            data: body,
            message,
        }
    }

    /// Wraps an error-status response body.
    pub(crate) fn http_error(status: u16, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|b| {
                b.get("message")
                    .and_then(Value::as_str)
                    .or_else(|| b.get("error").and_then(Value::as_str))
            })
            .unwrap_or("Request failed")
            .to_string();
        Self {
            success: false,
            status,
            data: body,
            message,
        }
    }

    /// Failure shape for requests that got no response at all.
    pub(crate) fn no_response() -> Self {
        Self {
            success: false,
            status: 0,
            data: None,
            message: "Server not responding".to_string(),
        }
    }

    /// Failure shape for requests that could not be built or sent.
    pub(crate) fn send_failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            status: 0,
            data: None,
            message: message.into(),
        }
    }

    /// Client-side failure for a feature the current role cannot reach.
    pub(crate) fn unavailable(what: &str) -> Self {
        Self {
            success: false,
            status: 0,
            data: None,
            message: format!("{what} is not available for the current role"),
        }
    }

    /// Returns the backend's `message` payload, which the RPC API uses to
    /// carry action-specific objects (lists, totals, token grants).
    pub fn payload(&self) -> Option<&Value> {
        self.data.as_ref()?.get("message")
    }
}

/// Backend HTTP client.
///
/// Reads the current session from the shared [`SessionStore`] on every
/// request and attaches `Authorization: token <apiKey>:<apiSecret>` when
/// both credential halves are present.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<SessionStore>,
}

impl ApiClient {
    /// Creates a client for `base_url` backed by `store`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, store: Arc<SessionStore>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            store,
        })
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a GET request with query parameters.
    pub async fn get(&self, path: &str, params: &[(&str, String)]) -> ApiResponse {
        let builder = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(params);
        self.execute(path, builder).await
    }

    /// Issues a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> ApiResponse {
        let builder = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body);
        self.execute(path, builder).await
    }

    async fn execute(&self, path: &str, builder: reqwest::RequestBuilder) -> ApiResponse {
        let mut builder = builder
            .header("accept", "application/json")
            .header("user-agent", USER_AGENT);

        // The persisted record is re-read on every request. Fail-open: a
        // missing or unparsable session sends the request without
        // credentials and lets the backend decide.
        if let Some(auth) = self.store.load().and_then(|s| s.authorization()) {
            builder = builder.header("authorization", auth);
        }

        let normalized = match builder.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let body: Option<Value> = response.json().await.ok();
                if (200..300).contains(&status) {
                    ApiResponse::ok(status, body)
                } else {
                    ApiResponse::http_error(status, body)
                }
            }
            Err(err) => classify_send_error(&err),
        };

        if normalized.success {
            tracing::debug!(path, status = normalized.status, "portal request ok");
        } else {
            tracing::debug!(
                path,
                status = normalized.status,
                message = %normalized.message,
                "portal request failed"
            );
        }
        normalized
    }
}

fn classify_send_error(err: &reqwest::Error) -> ApiResponse {
    if err.is_timeout() || err.is_connect() {
        ApiResponse::no_response()
    } else if err.is_builder() || err.is_request() {
        ApiResponse::send_failure(err.to_string())
    } else {
        ApiResponse::no_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::roles::Role;
    use crate::session::Session;

    fn store_with_session(dir: &std::path::Path) -> Arc<SessionStore> {
        let store = Arc::new(SessionStore::open(dir));
        store
            .save(&Session {
                user_id: "u1".to_string(),
                api_key: "k".to_string(),
                api_secret: "s".to_string(),
                role: Role::User,
            })
            .unwrap();
        store
    }

    /// Test: 2xx responses wrap the body and lift a string message.
    #[tokio::test]
    async fn test_success_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/method/portal.merchant_api.get_dashboard_stats"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "ok", "data": {"n": 1}})),
            )
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let client = ApiClient::new(server.uri(), store_with_session(dir.path())).unwrap();
        let res = client
            .get("/method/portal.merchant_api.get_dashboard_stats", &[])
            .await;

        assert!(res.success);
        assert_eq!(res.status, 200);
        assert_eq!(res.message, "ok");
        assert_eq!(res.data, Some(json!({"message": "ok", "data": {"n": 1}})));
    }

    /// Test: a non-string message falls back to "Success".
    #[tokio::test]
    async fn test_success_object_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": {"orders": [], "total": 0}})),
            )
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let client = ApiClient::new(server.uri(), store_with_session(dir.path())).unwrap();
        let res = client.post("/method/x", &json!({})).await;

        assert!(res.success);
        assert_eq!(res.message, "Success");
        assert_eq!(res.payload(), Some(&json!({"orders": [], "total": 0})));
    }

    /// Test: 2xx with a non-JSON body still succeeds with no data.
    #[tokio::test]
    async fn test_success_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let client = ApiClient::new(server.uri(), store_with_session(dir.path())).unwrap();
        let res = client.get("/method/x", &[]).await;

        assert!(res.success);
        assert_eq!(res.status, 204);
        assert_eq!(res.data, None);
        assert_eq!(res.message, "Success");
    }

    /// Test: backend errors pass through status, message, and error body.
    #[tokio::test]
    async fn test_backend_error_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "bad request"})),
            )
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let client = ApiClient::new(server.uri(), store_with_session(dir.path())).unwrap();
        let res = client.get("/method/x", &[]).await;

        assert!(!res.success);
        assert_eq!(res.status, 400);
        assert_eq!(res.message, "bad request");
        assert_eq!(res.data, Some(json!({"message": "bad request"})));
    }

    /// Test: the error field is used when message is absent, with a final
    /// fallback for bodies carrying neither.
    #[tokio::test]
    async fn test_backend_error_fallbacks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/err"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let client = ApiClient::new(server.uri(), store_with_session(dir.path())).unwrap();

        let res = client.get("/err", &[]).await;
        assert_eq!((res.success, res.status, res.message.as_str()), (false, 500, "boom"));

        let res = client.get("/empty", &[]).await;
        assert_eq!(
            (res.success, res.status, res.message.as_str()),
            (false, 404, "Request failed")
        );
    }

    /// Test: no response at all normalizes to status 0.
    #[tokio::test]
    async fn test_no_response() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let dir = tempdir().unwrap();
        let client = ApiClient::new(uri, store_with_session(dir.path())).unwrap();
        let res = client.get("/method/x", &[]).await;

        assert!(!res.success);
        assert_eq!(res.status, 0);
        assert_eq!(res.message, "Server not responding");
    }

    /// Test: the bearer credential is attached when a session exists.
    #[tokio::test]
    async fn test_authorization_header_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "token k:s"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let client = ApiClient::new(server.uri(), store_with_session(dir.path())).unwrap();
        let res = client.get("/method/x", &[]).await;
        assert!(res.success);
    }

    /// Test: a corrupt persisted session sends the request unauthenticated.
    #[tokio::test]
    async fn test_fail_open_on_corrupt_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let store = Arc::new(SessionStore::open(dir.path()));
        std::fs::write(store.session_path(), "{ not json").unwrap();

        let client = ApiClient::new(server.uri(), Arc::clone(&store)).unwrap();
        let res = client.get("/method/x", &[]).await;
        assert!(res.success);

        let requests = server.received_requests().await.unwrap();
        assert!(
            requests
                .iter()
                .all(|r| !r.headers.contains_key("authorization"))
        );
    }

    /// Test: query parameters are forwarded.
    #[tokio::test]
    async fn test_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let client = ApiClient::new(server.uri(), store_with_session(dir.path())).unwrap();
        let res = client.get("/method/x", &[("page", "2".to_string())]).await;
        assert!(res.success);
    }
}
