//! Image endpoint tests: binary pass-through.

mod common;

use common::*;
use wiremock::matchers::{method, path};

use marksearch_client::ImageVariant;

// PNG magic plus a little payload; enough to prove bytes are untouched.
const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01, 0x02, 0x03,
];

#[tokio::test]
async fn image_bytes_and_content_type_are_proxied() {
    let server = MockServer::start().await;
    mount_priming(&server, "abc123").await;
    mount_login(&server, load_fixture("auth/login_success.json")).await;

    Mock::given(method("GET"))
        .and(path("/api/images/TM-2019-00123/thumbnail"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let image = client
        .image("TM-2019-00123", ImageVariant::Thumbnail)
        .await
        .unwrap();

    assert_eq!(image.content_type, "image/png");
    assert_eq!(image.bytes, PNG_BYTES);
}

#[tokio::test]
async fn variant_selects_the_upstream_path() {
    let server = MockServer::start().await;
    mount_priming(&server, "abc123").await;
    mount_login(&server, load_fixture("auth/login_success.json")).await;

    Mock::given(method("GET"))
        .and(path("/api/images/TM-2019-00123/full"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .image("TM-2019-00123", ImageVariant::Full)
        .await
        .unwrap();
}
