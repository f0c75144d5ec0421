use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use thiserror::Error;

use crate::client::{AssistantService, ClientSettings, ReqwestService};
use crate::{CrawlDepth, EngineEvent, ServiceError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] ServiceError),
    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(std::io::Error),
}

enum EngineCommand {
    Ingest { url: String, depth: CrawlDepth },
    Clear,
    Chat { message: String },
    Health,
}

/// Handle to the background request runner.
///
/// Every command becomes its own task on a dedicated tokio runtime, so an
/// in-flight ingest never delays a chat request and vice versa. Results come
/// back as `EngineEvent`s in completion order.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let service = ReqwestService::new(settings)?;
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<dyn AssistantService>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("crawlchat-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let service = service.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_command(service.as_ref(), command).await;
                        let _ = event_tx.send(event);
                    });
                }
                engine_info!("engine command channel closed, shutting down");
            })
            .map_err(EngineError::Thread)?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn ingest(&self, url: impl Into<String>, depth: CrawlDepth) {
        self.send(EngineCommand::Ingest {
            url: url.into(),
            depth,
        });
    }

    pub fn clear(&self) {
        self.send(EngineCommand::Clear);
    }

    pub fn chat(&self, message: impl Into<String>) {
        self.send(EngineCommand::Chat {
            message: message.into(),
        });
    }

    pub fn check_health(&self) {
        self.send(EngineCommand::Health);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("engine thread is gone; dropping command");
        }
    }
}

async fn handle_command(service: &dyn AssistantService, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Ingest { url, depth } => {
            engine_info!("ingest depth={:?} url={}", depth, url);
            let result = service.ingest(&url, depth).await;
            log_failure("ingest", &result);
            EngineEvent::IngestCompleted { depth, result }
        }
        EngineCommand::Clear => {
            engine_info!("clear memory");
            let result = service.clear().await;
            log_failure("clear", &result);
            EngineEvent::ClearCompleted { result }
        }
        EngineCommand::Chat { message } => {
            engine_info!("chat message_len={}", message.len());
            let result = service.chat(&message).await;
            log_failure("chat", &result);
            EngineEvent::ChatCompleted { result }
        }
        EngineCommand::Health => {
            let result = service.health().await;
            log_failure("health", &result);
            EngineEvent::HealthCompleted { result }
        }
    }
}

fn log_failure<T>(operation: &str, result: &Result<T, ServiceError>) {
    if let Err(err) = result {
        engine_warn!("{} failed ({}): {}", operation, err.kind, err);
    }
}
