use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which ingest endpoint a crawl goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlDepth {
    /// `POST /crawl`
    Shallow,
    /// `POST /crawl/deep`
    Deep,
}

impl CrawlDepth {
    pub fn path(self) -> &'static str {
        match self {
            CrawlDepth::Shallow => "crawl",
            CrawlDepth::Deep => "crawl/deep",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlRequest {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngestReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClearReply {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReply {
    pub status: String,
}

/// Completion notifications delivered back to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    IngestCompleted {
        depth: CrawlDepth,
        result: Result<IngestReply, ServiceError>,
    },
    ClearCompleted {
        result: Result<ClearReply, ServiceError>,
    },
    ChatCompleted {
        result: Result<ChatReply, ServiceError>,
    },
    HealthCompleted {
        result: Result<HealthReply, ServiceError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedBody,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
        }
    }
}
