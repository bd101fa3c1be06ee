//! Integration tests for the error handling contract
//!
//! Validation failures must be raised before any network call, vendor
//! rejections must be reported as a result variant (never an `Err`), and
//! transport failures must propagate unmodified.

use removebg::{
    Channels, ForegroundType, OutputFormat, OutputSize, RemovalOptions, RemovalOutcome, RemoveBg,
    RemoveBgError, TypeLevel,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_client(server: &MockServer) -> RemoveBg {
    RemoveBg::builder("test-api-key")
        .endpoint(format!("{}/v1.0/removebg", server.uri()))
        .build()
        .expect("client")
}

/// A network-call spy: the mock expects zero invocations, so any request
/// reaching the server fails the test when the mock is verified on drop.
async fn spy_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/removebg"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn every_enum_rejects_values_outside_its_set() {
    let server = spy_server().await;

    assert!(matches!(
        "gigantic".parse::<OutputSize>(),
        Err(RemoveBgError::InvalidArgument(_))
    ));
    assert!(matches!(
        "house".parse::<ForegroundType>(),
        Err(RemoveBgError::InvalidArgument(_))
    ));
    assert!(matches!(
        "0".parse::<TypeLevel>(),
        Err(RemoveBgError::InvalidArgument(_))
    ));
    assert!(matches!(
        "gif".parse::<OutputFormat>(),
        Err(RemoveBgError::InvalidArgument(_))
    ));
    assert!(matches!(
        "gray".parse::<Channels>(),
        Err(RemoveBgError::InvalidArgument(_))
    ));

    // Rejection happened before request construction: the spy saw nothing.
    assert!(server.received_requests().await.expect("requests").is_empty());
}

#[tokio::test]
async fn url_variant_requires_a_consumption_mode() {
    let server = spy_server().await;
    let options = RemovalOptions::builder().no_output_file().build();

    let err = mock_client(&server)
        .await
        .remove_from_url("https://example.com/cat.jpg", &options)
        .await
        .expect_err("should fail fast");
    assert!(matches!(err, RemoveBgError::InvalidArgument(_)));

    assert!(server.received_requests().await.expect("requests").is_empty());
}

#[tokio::test]
async fn base64_variant_requires_a_consumption_mode() {
    let server = spy_server().await;
    let options = RemovalOptions::builder().no_output_file().build();

    let err = mock_client(&server)
        .await
        .remove_from_base64("aGVsbG8", &options)
        .await
        .expect_err("should fail fast");
    assert!(matches!(err, RemoveBgError::InvalidArgument(_)));

    assert!(server.received_requests().await.expect("requests").is_empty());
}

#[tokio::test]
async fn either_consumption_mode_alone_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/removebg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"content".as_slice()))
        .expect(2)
        .mount(&server)
        .await;
    let client = mock_client(&server).await;

    let temp = tempfile::tempdir().expect("tempdir");
    let file_only = RemovalOptions::builder()
        .output_path(temp.path().join("out.png"))
        .build();
    assert!(client
        .remove_from_url("https://example.com/cat.jpg", &file_only)
        .await
        .expect("file-only")
        .is_processed());

    let bytes_only = RemovalOptions::builder()
        .no_output_file()
        .return_bytes(true)
        .build();
    assert!(client
        .remove_from_url("https://example.com/cat.jpg", &bytes_only)
        .await
        .expect("bytes-only")
        .is_processed());
}

#[tokio::test]
async fn vendor_rejection_is_an_outcome_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/removebg"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"errors":[{"title":"Foo Bar"}]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let temp = tempfile::tempdir().expect("tempdir");
    let output = temp.path().join("out.png");
    let options = RemovalOptions::builder().output_path(&output).build();

    let outcome = mock_client(&server)
        .await
        .remove_from_url("https://example.com/cat.jpg", &options)
        .await
        .expect("rejection is not an Err");

    assert_eq!(
        outcome,
        RemovalOutcome::Rejected {
            status: 400,
            reason: "foo bar".to_string(),
        }
    );
    // No content was produced.
    assert!(!output.exists());
}

#[tokio::test]
async fn unparseable_error_body_yields_unknown_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/removebg"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let options = RemovalOptions::builder()
        .no_output_file()
        .return_bytes(true)
        .build();
    let outcome = mock_client(&server)
        .await
        .remove_from_url("https://example.com/cat.jpg", &options)
        .await
        .expect("rejection is not an Err");

    assert_eq!(outcome.rejection_reason(), Some("unknown error"));
    assert_eq!(outcome.bytes(), None);
}

#[tokio::test]
async fn missing_source_file_propagates_io_error() {
    let server = spy_server().await;
    let temp = tempfile::tempdir().expect("tempdir");
    let options = RemovalOptions::builder()
        .output_path(temp.path().join("out.png"))
        .build();

    let err = mock_client(&server)
        .await
        .remove_from_file(temp.path().join("does-not-exist.jpg"), &options)
        .await
        .expect_err("unreadable input is an error");
    assert!(matches!(err, RemoveBgError::Io(_)));

    assert!(server.received_requests().await.expect("requests").is_empty());
}

#[tokio::test]
async fn missing_background_file_propagates_io_error() {
    let server = spy_server().await;
    let temp = tempfile::tempdir().expect("tempdir");
    let source = temp.path().join("cat.jpg");
    std::fs::write(&source, b"source-bytes").expect("source fixture");

    let options = RemovalOptions::builder()
        .output_path(temp.path().join("out.png"))
        .background(removebg::Background::file(temp.path().join("missing-bg.png")))
        .build();

    let err = mock_client(&server)
        .await
        .remove_from_file(&source, &options)
        .await
        .expect_err("unreadable background is an error");
    assert!(matches!(err, RemoveBgError::Io(_)));

    // The source handle was already released again.
    std::fs::remove_file(&source).expect("source still removable");
}

#[tokio::test]
async fn output_write_failure_is_swallowed_and_logged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/removebg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"content".as_slice()))
        .expect(1)
        .mount(&server)
        .await;

    let temp = tempfile::tempdir().expect("tempdir");
    // Parent directory does not exist, so the write must fail.
    let unwritable = temp.path().join("missing-dir").join("out.png");
    let options = RemovalOptions::builder()
        .output_path(&unwritable)
        .return_bytes(true)
        .build();

    let outcome = mock_client(&server)
        .await
        .remove_from_url("https://example.com/cat.jpg", &options)
        .await
        .expect("write failure is not an Err");

    // The bytes still reach the caller; only the file write was lost.
    assert_eq!(outcome.bytes(), Some(b"content".as_slice()));
    assert_eq!(outcome.written_to(), None);
}

#[tokio::test]
async fn transport_failure_propagates() {
    // Nothing listens on this port.
    let client = RemoveBg::builder("test-api-key")
        .endpoint("http://127.0.0.1:9/v1.0/removebg")
        .build()
        .expect("client");
    let options = RemovalOptions::builder()
        .no_output_file()
        .return_bytes(true)
        .build();

    let err = client
        .remove_from_url("https://example.com/cat.jpg", &options)
        .await
        .expect_err("connection failure propagates");
    assert!(matches!(err, RemoveBgError::Transport(_)));
}
