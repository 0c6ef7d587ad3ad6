//! Integration tests for route-guarded commands.

mod fixtures;

use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{can_bind_localhost, message_response, seed_session, temp_home};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

#[tokio::test]
async fn test_protected_command_requires_login() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    cargo_bin_cmd!("paydesk")
        .env("PAYDESK_HOME", home.path())
        .env("PAYDESK_BASE_URL", server.uri())
        .args(["orders"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));

    // The guard redirects before any request goes out.
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_only_command_rejects_user_role() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    seed_session(&home, "user");

    cargo_bin_cmd!("paydesk")
        .env("PAYDESK_HOME", home.path())
        .env("PAYDESK_BASE_URL", server.uri())
        .args(["merchants", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not have access"));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_user_only_command_rejects_admin_role() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    seed_session(&home, "admin");

    cargo_bin_cmd!("paydesk")
        .env("PAYDESK_HOME", home.path())
        .env("PAYDESK_BASE_URL", server.uri())
        .args(["ledger"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not have access"));
}

#[tokio::test]
async fn test_shared_destination_renders_for_both_roles() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    seed_session(&home, "admin");

    Mock::given(method("GET"))
        .and(path("/method/portal.admin_api.get_dashboard_stats"))
        .respond_with(message_response(json!({
            "stats": {"total_orders": 7, "total_orders_amount": 900}
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("paydesk")
        .env("PAYDESK_HOME", home.path())
        .env("PAYDESK_BASE_URL", server.uri())
        .args(["dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total orders"));
}

#[tokio::test]
async fn test_corrupt_session_is_logged_out_for_guards() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    // A record that fails structural validation, and no marker file.
    std::fs::write(home.path().join("session.json"), "{ truncated").unwrap();

    cargo_bin_cmd!("paydesk")
        .env("PAYDESK_HOME", home.path())
        .env("PAYDESK_BASE_URL", server.uri())
        .args(["orders"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}
