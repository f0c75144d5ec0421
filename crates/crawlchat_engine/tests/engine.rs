use std::sync::{Arc, Mutex};
use std::time::Duration;

use crawlchat_engine::{
    AssistantService, ChatReply, ClearReply, CrawlDepth, EngineEvent, EngineHandle, FailureKind,
    HealthReply, IngestReply, ServiceError,
};
use pretty_assertions::assert_eq;

const WAIT: Duration = Duration::from_secs(5);

/// Fake service: ingest is slow, chat answers immediately.
#[derive(Default)]
struct FakeService {
    calls: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl AssistantService for FakeService {
    async fn ingest(&self, url: &str, depth: CrawlDepth) -> Result<IngestReply, ServiceError> {
        self.calls.lock().unwrap().push(format!("ingest {depth:?} {url}"));
        tokio::time::sleep(Duration::from_millis(300)).await;
        Ok(IngestReply {
            status: Some("success".to_string()),
            message: Some(format!("Ingested {url}")),
        })
    }

    async fn clear(&self) -> Result<ClearReply, ServiceError> {
        self.calls.lock().unwrap().push("clear".to_string());
        Ok(ClearReply { message: None })
    }

    async fn chat(&self, message: &str) -> Result<ChatReply, ServiceError> {
        self.calls.lock().unwrap().push(format!("chat {message}"));
        Ok(ChatReply {
            response: format!("echo: {message}"),
        })
    }

    async fn health(&self) -> Result<HealthReply, ServiceError> {
        Err(ServiceError {
            kind: FailureKind::Network,
            message: "connection refused".to_string(),
        })
    }
}

#[test]
fn chat_completes_while_ingest_is_in_flight() {
    let service = Arc::new(FakeService::default());
    let engine = EngineHandle::with_service(service.clone()).unwrap();

    engine.ingest("https://example.com", CrawlDepth::Deep);
    engine.chat("hello");

    let first = engine.recv_timeout(WAIT).expect("first event");
    let second = engine.recv_timeout(WAIT).expect("second event");

    assert_eq!(
        first,
        EngineEvent::ChatCompleted {
            result: Ok(ChatReply {
                response: "echo: hello".to_string(),
            }),
        }
    );
    assert_eq!(
        second,
        EngineEvent::IngestCompleted {
            depth: CrawlDepth::Deep,
            result: Ok(IngestReply {
                status: Some("success".to_string()),
                message: Some("Ingested https://example.com".to_string()),
            }),
        }
    );
    assert_eq!(service.calls.lock().unwrap().len(), 2);
}

#[test]
fn failures_are_delivered_as_events() {
    let engine = EngineHandle::with_service(Arc::new(FakeService::default())).unwrap();

    engine.check_health();

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::HealthCompleted { result: Err(err) }) => {
            assert_eq!(err.kind, FailureKind::Network);
            assert_eq!(err.to_string(), "connection refused");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn clear_issues_one_call() {
    let service = Arc::new(FakeService::default());
    let engine = EngineHandle::with_service(service.clone()).unwrap();

    engine.clear();

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::ClearCompleted {
            result: Ok(ClearReply { message: None }),
        })
    );
    assert_eq!(*service.calls.lock().unwrap(), vec!["clear".to_string()]);
    assert_eq!(engine.try_recv(), None);
}
