//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a temp PAYDESK_HOME directory for test isolation.
pub fn temp_home() -> TempDir {
    TempDir::new().expect("create temp paydesk home")
}

pub fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Mounts a login mock returning a token grant with the given backend role.
pub async fn mount_login(server: &MockServer, raw_role: &str) {
    Mock::given(method("POST"))
        .and(path("/method/generate_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {
                "user_id": "u1",
                "api_key": "k",
                "api_secret": "s",
                "role": raw_role
            }
        })))
        .mount(server)
        .await;
}

/// Writes a persisted session directly, bypassing the login exchange.
///
/// `role` is the resolved value ("admin" or "user").
pub fn seed_session(home: &TempDir, role: &str) {
    let session = json!({
        "userId": "u1",
        "apiKey": "k",
        "apiSecret": "s",
        "role": role
    });
    std::fs::write(home.path().join("session.json"), session.to_string()).unwrap();
    std::fs::write(home.path().join("logged_in"), "true").unwrap();
}

/// A 200 response whose body is `{"message": <payload>}`.
pub fn message_response(payload: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "message": payload }))
}
