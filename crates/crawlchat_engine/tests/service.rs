use std::time::Duration;

use crawlchat_engine::{
    AssistantService, ClientSettings, CrawlDepth, FailureKind, ReqwestService,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ReqwestService {
    let settings = ClientSettings::with_base_url(&server.uri()).unwrap();
    ReqwestService::new(settings).unwrap()
}

#[tokio::test]
async fn standard_ingest_posts_url_to_crawl() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crawl"))
        .and(body_json(json!({ "url": "https://example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Ingested 1 page"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = service_for(&server)
        .ingest("https://example.com", CrawlDepth::Shallow)
        .await
        .expect("ingest ok");

    assert_eq!(reply.status.as_deref(), Some("success"));
    assert_eq!(reply.message.as_deref(), Some("Ingested 1 page"));
}

#[tokio::test]
async fn deep_ingest_uses_deep_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crawl/deep"))
        .and(body_json(json!({ "url": "https://example.com/docs" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = service_for(&server)
        .ingest("https://example.com/docs", CrawlDepth::Deep)
        .await
        .expect("deep ingest ok");

    assert_eq!(reply.status.as_deref(), Some("success"));
    assert_eq!(reply.message, None);
}

#[tokio::test]
async fn ingest_reply_without_status_still_parses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let reply = service_for(&server)
        .ingest("https://example.com", CrawlDepth::Shallow)
        .await
        .expect("ingest ok");

    assert_eq!(reply.status, None);
}

#[tokio::test]
async fn chat_posts_message_and_reads_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({ "message": "What is this site about?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "response": "It's an example domain."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = service_for(&server)
        .chat("What is this site about?")
        .await
        .expect("chat ok");

    assert_eq!(reply.response, "It's an example domain.");
}

#[tokio::test]
async fn clear_posts_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/clear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Cleared" })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = service_for(&server).clear().await.expect("clear ok");
    assert_eq!(reply.message.as_deref(), Some("Cleared"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn health_reads_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .mount(&server)
        .await;

    let reply = service_for(&server).health().await.expect("health ok");
    assert_eq!(reply.status, "healthy");
}

#[tokio::test]
async fn non_success_status_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "model offline" })),
        )
        .mount(&server)
        .await;

    let err = service_for(&server).chat("hi").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert!(err.to_string().contains("model offline"), "{err}");
}

#[tokio::test]
async fn malformed_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = service_for(&server).chat("hi").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn chat_reply_without_response_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .mount(&server)
        .await;

    let err = service_for(&server).chat("hi").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "status": "success" })),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::with_base_url(&server.uri()).unwrap()
    };
    let service = ReqwestService::new(settings).unwrap();

    let err = service
        .ingest("https://example.com", CrawlDepth::Shallow)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    // Nothing listens on the discard port.
    let settings = ClientSettings {
        connect_timeout: Duration::from_millis(200),
        ..ClientSettings::with_base_url("http://127.0.0.1:9").unwrap()
    };
    let service = ReqwestService::new(settings).unwrap();

    let err = service.health().await.unwrap_err();
    assert!(
        matches!(err.kind, FailureKind::Network | FailureKind::Timeout),
        "{:?}",
        err.kind
    );
    assert!(!err.to_string().is_empty());
}
