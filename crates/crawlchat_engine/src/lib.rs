//! Crawlchat engine: HTTP client for the ingest/chat service and the
//! background runtime that executes requests off the UI thread.
mod client;
mod engine;
mod types;

pub use client::{AssistantService, ClientSettings, ReqwestService, DEFAULT_BASE_URL};
pub use engine::{EngineError, EngineHandle};
pub use types::{
    ChatReply, ChatRequest, ClearReply, CrawlDepth, CrawlRequest, EngineEvent, FailureKind,
    HealthReply, IngestReply, ServiceError,
};
