//! End-to-end behaviour of the payload receiver over real sockets.

use axum::http::StatusCode;
use payload_receiver::{HttpServer, ReceiverConfig};

mod common;

const ACK: &str = "HTTP OK from server a";

#[tokio::test]
async fn json_object_is_acknowledged() {
    let server = common::start_receiver().await;
    let res = common::client()
        .post(format!("http://{}/", server.local_addr()))
        .body(r#"{"a":1}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/plain");
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), ACK);
    server.stop().await.unwrap();
}

#[tokio::test]
async fn json_array_is_acknowledged() {
    let server = common::start_receiver().await;
    let res = common::client()
        .post(format!("http://{}/", server.local_addr()))
        .body("[1,2,3]")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), ACK);
}

#[tokio::test]
async fn scalar_documents_are_acknowledged() {
    let server = common::start_receiver().await;
    let client = common::client();
    for body in ["\"hi\"", "3.25", "false", "null"] {
        let res = client
            .post(format!("http://{}/", server.local_addr()))
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "body {body}");
    }
}

#[tokio::test]
async fn non_json_is_rejected() {
    let server = common::start_receiver().await;
    let res = common::client()
        .post(format!("http://{}/", server.local_addr()))
        .body("not-json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.text().await.unwrap().contains("Invalid JSON payload"));
}

#[tokio::test]
async fn empty_body_is_rejected() {
    let server = common::start_receiver().await;
    let res = common::client()
        .post(format!("http://{}/", server.local_addr()))
        .body("")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_content_length_means_empty_body() {
    let server = common::start_receiver().await;
    let response = common::raw_exchange(
        server.local_addr(),
        b"POST /ingest HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 400"), "got: {response}");
    assert!(response.contains("Invalid JSON payload"));
}

#[tokio::test]
async fn unparsable_content_length_is_rejected_by_the_protocol_layer() {
    let server = common::start_receiver().await;
    let response = common::raw_exchange(
        server.local_addr(),
        b"POST / HTTP/1.1\r\nHost: localhost\r\nContent-Length: abc\r\nConnection: close\r\n\r\n",
    )
    .await;

    // hyper answers before routing; the payload handler never sees the request.
    assert!(response.starts_with("HTTP/1.1 400"), "got: {response}");
    assert!(!response.contains("Invalid JSON payload"), "got: {response}");
}

#[tokio::test]
async fn reads_exactly_content_length_bytes() {
    let server = common::start_receiver().await;
    let response = common::raw_exchange(
        server.local_addr(),
        b"POST / HTTP/1.1\r\nHost: localhost\r\nContent-Length: 7\r\nConnection: close\r\n\r\n{\"a\":1}",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.ends_with(ACK));
}

#[tokio::test]
async fn non_utf8_body_is_a_bad_request() {
    let server = common::start_receiver().await;
    let res = common::client()
        .post(format!("http://{}/", server.local_addr()))
        .body(vec![b'"', 0xff, 0xfe, b'"'])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "Invalid UTF-8 payload");
}

#[tokio::test]
async fn repeated_posts_get_identical_responses() {
    let server = common::start_receiver().await;
    let client = common::client();

    for _ in 0..5 {
        let ok = client
            .post(format!("http://{}/", server.local_addr()))
            .body(r#"{"same":true}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(ok.text().await.unwrap(), ACK);

        let bad = client
            .post(format!("http://{}/", server.local_addr()))
            .body("{invalid}")
            .send()
            .await
            .unwrap();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn any_path_is_accepted() {
    let server = common::start_receiver().await;
    let res = common::client()
        .post(format!("http://{}/deeply/nested/path?x=1", server.local_addr()))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let server = common::start_receiver().await;
    let res = common::client()
        .get(format!("http://{}/", server.local_addr()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut config = ReceiverConfig::default();
    config.limits.max_body_size = 16;
    let server = common::start_server(HttpServer::new(config)).await;

    let res = common::client()
        .post(format!("http://{}/", server.local_addr()))
        .body(format!("[{}]", "1,".repeat(32) + "1"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn client_request_id_is_echoed() {
    let server = common::start_receiver().await;
    let res = common::client()
        .post(format!("http://{}/", server.local_addr()))
        .header("x-request-id", "trace-me")
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()["x-request-id"], "trace-me");
}
