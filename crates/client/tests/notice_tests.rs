//! Notice endpoint tests: XML fetch and structural conversion.

mod common;

use common::*;
use wiremock::matchers::{method, path};

use marksearch_client::Error;

#[tokio::test]
async fn notice_is_fetched_and_converted_to_nested_json() {
    let server = MockServer::start().await;
    mount_priming(&server, "abc123").await;
    mount_login(&server, load_fixture("auth/login_success.json")).await;

    Mock::given(method("GET"))
        .and(path("/api/notices/TM-2019-00123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(load_fixture_text("notice/notice.xml"), "application/xml"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let notice = client.notice("TM-2019-00123").await.unwrap();

    let root = &notice["TradeMarkNotice"];
    assert_eq!(root["@lang"], serde_json::json!("en"));
    assert_eq!(root["MarkText"], serde_json::json!("ACME"));
    assert_eq!(root["Status"]["@code"], serde_json::json!("R"));
    assert_eq!(root["Status"]["#text"], serde_json::json!("Registered"));
    // Repeated <Class> elements collapse into an array.
    assert_eq!(root["Class"], serde_json::json!(["9", "42"]));
    assert_eq!(
        root["Applicant"]["Address"]["City"],
        serde_json::json!("Oslo")
    );
}

#[tokio::test]
async fn unparseable_notice_body_is_an_unexpected_error() {
    let server = MockServer::start().await;
    mount_priming(&server, "abc123").await;
    mount_login(&server, load_fixture("auth/login_success.json")).await;

    Mock::given(method("GET"))
        .and(path("/api/notices/TM-broken"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<oops>", "application/xml"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.notice("TM-broken").await.unwrap_err();
    assert!(matches!(err, Error::Unexpected(_)));
}

#[tokio::test]
async fn missing_notice_surfaces_upstream_404() {
    let server = MockServer::start().await;
    mount_priming(&server, "abc123").await;
    mount_login(&server, load_fixture("auth/login_success.json")).await;

    Mock::given(method("GET"))
        .and(path("/api/notices/TM-unknown"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such notice"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.notice("TM-unknown").await.unwrap_err();
    assert!(matches!(err, Error::Upstream { status: 404, .. }));
}
