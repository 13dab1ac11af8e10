//! HTTP backend tests against a local mock server.

use parley_interaction::{AnswerBackend, AskRequest, BackendError, FilePayload, HttpAnswerBackend};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpAnswerBackend {
    HttpAnswerBackend::new(
        format!("{}/api/ask", server.uri()),
        format!("{}/api/upload", server.uri()),
    )
}

#[tokio::test]
async fn ask_posts_query_with_guest_id_and_decodes_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .and(body_json(json!({"query": "find docs", "guestId": "g-7"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "here",
            "citations": [{"id": 1}],
            "type": "answer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = backend_for(&server)
        .ask(AskRequest {
            query: "find docs".to_string(),
            guest_id: Some("g-7".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(payload.text, "here");
    assert_eq!(payload.citations.len(), 1);
}

#[tokio::test]
async fn non_success_status_yields_server_error_with_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"detail": "rate limited"})),
        )
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .ask(AskRequest {
            query: "hello".to_string(),
            guest_id: None,
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BackendError::Server {
            status: 429,
            detail: "rate limited".to_string(),
        }
    );
}

#[tokio::test]
async fn detail_falls_back_when_error_body_is_not_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .ask(AskRequest {
            query: "hello".to_string(),
            guest_id: None,
        })
        .await
        .unwrap_err();

    match err {
        BackendError::Server { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "Unknown error");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_yields_transport_error() {
    // Nothing listens on this port.
    let backend = HttpAnswerBackend::new(
        "http://127.0.0.1:1/api/ask".to_string(),
        "http://127.0.0.1:1/api/upload".to_string(),
    );

    let err = backend
        .ask(AskRequest {
            query: "hello".to_string(),
            guest_id: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Transport(_)));
}

#[tokio::test]
async fn upload_sends_multipart_and_decodes_receipt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "File stored."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let receipt = backend_for(&server)
        .upload(FilePayload::new("report.pdf", b"%PDF-1.4".to_vec()))
        .await
        .unwrap();

    assert_eq!(receipt.message, "File stored.");
}
