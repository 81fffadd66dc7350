//! Durable token side-cache tests.
//!
//! The file-backed store lets a restarted process resume its token without
//! a fresh login; clearing auth state must also destroy the file.

mod common;

use std::sync::atomic::Ordering;

use common::*;

use marksearch_client::RegistryClient;

fn cached_client(server: &MockServer, path: std::path::PathBuf) -> RegistryClient {
    RegistryClient::builder()
        .base_url(server.uri())
        .credentials(test_credentials())
        .token_cache(path)
        .build()
        .unwrap()
}

#[tokio::test]
async fn resumed_process_reuses_the_cached_token() {
    let server = MockServer::start().await;
    mount_priming(&server, "abc123").await;
    let login_hits = mount_login(&server, load_fixture("auth/login_success.json")).await;

    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("token.json");

    let first = cached_client(&server, cache_path.clone());
    assert_eq!(first.acquire_token().await.unwrap(), "tok-1");
    assert!(cache_path.exists());
    drop(first);

    // A fresh client (simulated restart) resumes from the file.
    let second = cached_client(&server, cache_path);
    assert_eq!(second.acquire_token().await.unwrap(), "tok-1");
    assert_eq!(login_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn clearing_auth_state_destroys_the_side_cache() {
    let server = MockServer::start().await;
    mount_priming(&server, "abc123").await;
    let login_hits = mount_login(&server, load_fixture("auth/login_success.json")).await;

    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("token.json");

    let client = cached_client(&server, cache_path.clone());
    client.acquire_token().await.unwrap();
    client.clear_auth_state();
    assert!(!cache_path.exists());

    // Next acquire runs a full login again.
    client.acquire_token().await.unwrap();
    assert_eq!(login_hits.load(Ordering::SeqCst), 2);
}
