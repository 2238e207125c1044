use std::time::Duration;

use megi_client::{ClientConfig, HttpSubmissionClient};
use megi_core::{SubmissionClient, SubmissionError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn posts_payload_with_bearer_and_reads_numeric_id() {
    let server = MockServer::start().await;
    let payload = json!({"title": "Build a CRM", "budgetAmount": 500});

    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 981, "title": "Build a CRM"})))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = ClientConfig::new(format!("{}/api/", server.uri())).with_token("secret");
    let client = HttpSubmissionClient::new(&cfg, "projects").expect("client");
    let receipt = client.create(&payload).await.expect("created");
    assert_eq!(receipt.id, "981");
}

#[tokio::test]
async fn rejection_carries_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/disputes"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"detail": "A dispute is already open for this contract"})))
        .mount(&server)
        .await;

    let client = HttpSubmissionClient::new(&ClientConfig::new(server.uri()), "disputes").unwrap();
    let err = client.create(&json!({})).await.unwrap_err();
    assert_eq!(err,
               SubmissionError::Rejected { status: 409,
                                           message: "A dispute is already open for this contract".into() });
    assert_eq!(err.user_message(), "A dispute is already open for this contract");
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "x"}))
                                                .set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let cfg = ClientConfig::new(server.uri()).with_timeout(Duration::from_millis(50));
    let client = HttpSubmissionClient::new(&cfg, "gigs").unwrap();
    assert_eq!(client.create(&json!({})).await.unwrap_err(), SubmissionError::Timeout);
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // puerto libre sin listener: conexión rechazada
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let client = HttpSubmissionClient::new(&ClientConfig::new(format!("http://127.0.0.1:{port}")), "payments").unwrap();
    assert!(matches!(client.create(&json!({})).await, Err(SubmissionError::Transport(_))));
}

#[tokio::test]
async fn success_without_id_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let client = HttpSubmissionClient::new(&ClientConfig::new(server.uri()), "proposals").unwrap();
    assert!(matches!(client.create(&json!({})).await, Err(SubmissionError::Decode(_))));
}
