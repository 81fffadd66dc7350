//! Common test utilities for integration tests.
//!
//! Mock mounting helpers return an `Arc<AtomicUsize>` counting how many
//! times the route was actually hit, which is what the token-reuse and
//! single-flight assertions are made of.

// Each integration test binary compiles its own copy of this module and
// uses a different subset of it.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use secrecy::SecretString;
use wiremock::matchers::{method, path};

use marksearch_client::RegistryClient;
use marksearch_config::RegistryCredentials;

#[allow(unused_imports)]
pub use marksearch_client::testing::{load_fixture, load_fixture_text};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Default priming path the mocks answer on.
pub const PRIMING_PATH: &str = "/search";

/// Default login path the mocks answer on.
pub const LOGIN_PATH: &str = "/api/auth/login";

pub fn test_credentials() -> RegistryCredentials {
    RegistryCredentials {
        username: "svc-account".to_string(),
        password: SecretString::new("testpassword".to_string().into()),
    }
}

/// Build a client pointed at the mock server with test credentials.
pub fn test_client(server: &MockServer) -> RegistryClient {
    RegistryClient::builder()
        .base_url(server.uri())
        .credentials(test_credentials())
        .build()
        .unwrap()
}

/// Mount the session-priming page, setting the anti-forgery cookie.
/// Returns a counter of priming hits.
pub async fn mount_priming(server: &MockServer, cookie_value: &str) -> Arc<AtomicUsize> {
    mount_priming_with_delay(server, cookie_value, Duration::ZERO).await
}

/// Priming mock with an artificial response delay, for overlap tests.
pub async fn mount_priming_with_delay(
    server: &MockServer,
    cookie_value: &str,
    delay: Duration,
) -> Arc<AtomicUsize> {
    let counter = Arc::new(AtomicUsize::new(0));
    let hits = counter.clone();
    let cookie_value = cookie_value.to_string();
    Mock::given(method("GET"))
        .and(path(PRIMING_PATH))
        .respond_with(move |_: &wiremock::Request| {
            hits.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(200)
                .insert_header(
                    "set-cookie",
                    format!("XSRF-TOKEN={cookie_value}; Path=/"),
                )
                .set_delay(delay)
                .set_body_string("<!doctype html><html></html>")
        })
        .mount(server)
        .await;
    counter
}

/// Priming mock that sets NO anti-forgery cookie.
pub async fn mount_priming_without_cookie(server: &MockServer) -> Arc<AtomicUsize> {
    let counter = Arc::new(AtomicUsize::new(0));
    let hits = counter.clone();
    Mock::given(method("GET"))
        .and(path(PRIMING_PATH))
        .respond_with(move |_: &wiremock::Request| {
            hits.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(200).set_body_string("<!doctype html><html></html>")
        })
        .mount(server)
        .await;
    counter
}

/// Mount the login endpoint answering with `body`. Returns a counter of
/// login hits.
pub async fn mount_login(server: &MockServer, body: serde_json::Value) -> Arc<AtomicUsize> {
    let counter = Arc::new(AtomicUsize::new(0));
    let hits = counter.clone();
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(move |_: &wiremock::Request| {
            hits.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(200).set_body_json(&body)
        })
        .mount(server)
        .await;
    counter
}
