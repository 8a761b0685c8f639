//! Common test utilities and helpers
//!
//! This module provides a fake cluster session resource for integration tests.

#![allow(dead_code)]

use papi_lite::{PapiSession, config::ClusterSettings};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

pub const SESSION_ID: &str = "sess-1";
pub const CSRF_TOKEN: &str = "csrf-1";
pub const USER: &str = "api_user";
pub const PASSWORD: &str = "secret";

/// Successful login answer carrying both cookies
pub fn login_response() -> ResponseTemplate {
    ResponseTemplate::new(201)
        .append_header(
            "set-cookie",
            format!("isisessid={}; path=/; HttpOnly; Secure", SESSION_ID).as_str(),
        )
        .append_header(
            "set-cookie",
            format!("isicsrf={}; path=/; Secure", CSRF_TOKEN).as_str(),
        )
        .set_body_json(json!({"services": ["platform", "namespace"], "timeout_absolute": 14400}))
}

/// Mount the login resource, expecting it to be hit `times` times
pub async fn mount_login(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/session/1/session"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "username": USER,
            "password": PASSWORD,
            "services": ["platform", "namespace"]
        })))
        .respond_with(login_response())
        .expect(times)
        .mount(server)
        .await;
}

/// Mount the logout resource
pub async fn mount_logout(server: &MockServer) {
    Mock::given(method("DELETE"))
        .and(path("/session/1/session"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

/// Disconnected session pointed at the mock server
pub fn test_session(server: &MockServer) -> PapiSession {
    let mut session = PapiSession::new(server.uri());
    session.set_user(USER);
    session.set_password(PASSWORD);
    session
}

/// Connected session against a mock server with login/logout mounted
pub async fn connected_session(server: &MockServer, logins: u64) -> PapiSession {
    mount_login(server, logins).await;
    mount_logout(server).await;
    let mut session = test_session(server);
    session.connect().await.expect("login against mock server");
    session
}

/// Cluster settings pointed at the mock server
pub fn test_settings(server: &MockServer) -> ClusterSettings {
    ClusterSettings {
        endpoint: server.uri(),
        user: USER.to_string(),
        password: PASSWORD.to_string(),
        ..ClusterSettings::default()
    }
}
