use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{
    ChatReply, ChatRequest, ClearReply, CrawlDepth, CrawlRequest, FailureKind, HealthReply,
    IngestReply, ServiceError,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Upper bound for a whole request. Deep crawls are slow, so this is generous.
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub fn with_base_url(base_url: &str) -> Result<Self, ServiceError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
        }
    }
}

/// Remote ingest/chat service. One call per user action, no retries.
#[async_trait::async_trait]
pub trait AssistantService: Send + Sync {
    async fn ingest(&self, url: &str, depth: CrawlDepth) -> Result<IngestReply, ServiceError>;

    async fn clear(&self) -> Result<ClearReply, ServiceError>;

    async fn chat(&self, message: &str) -> Result<ChatReply, ServiceError>;

    async fn health(&self) -> Result<HealthReply, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestService {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestService {
    pub fn new(settings: ClientSettings) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        // Join relative to the base path, so `http://host/api` maps to `http://host/api/chat`.
        let mut base = self.settings.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn post<B, R>(&self, path: &str, body: Option<&B>) -> Result<R, ServiceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        engine_debug!("POST {}", url);
        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ServiceError> {
        let url = self.endpoint(path)?;
        engine_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }
}

#[async_trait::async_trait]
impl AssistantService for ReqwestService {
    async fn ingest(&self, url: &str, depth: CrawlDepth) -> Result<IngestReply, ServiceError> {
        let body = CrawlRequest {
            url: url.to_string(),
        };
        self.post(depth.path(), Some(&body)).await
    }

    async fn clear(&self) -> Result<ClearReply, ServiceError> {
        self.post::<(), _>("clear", None).await
    }

    async fn chat(&self, message: &str) -> Result<ChatReply, ServiceError> {
        let body = ChatRequest {
            message: message.to_string(),
        };
        self.post("chat", Some(&body)).await
    }

    async fn health(&self) -> Result<HealthReply, ServiceError> {
        self.get("health").await
    }
}

async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ServiceError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        let message = match error_detail(&bytes) {
            Some(detail) => format!("HTTP {status}: {detail}"),
            None => format!("HTTP {status}"),
        };
        engine_warn!("service responded with {}", message);
        return Err(ServiceError::new(
            FailureKind::HttpStatus(status.as_u16()),
            message,
        ));
    }

    serde_json::from_slice(&bytes).map_err(|err| {
        engine_warn!("unparseable response body ({} bytes): {}", bytes.len(), err);
        ServiceError::new(
            FailureKind::MalformedBody,
            format!("invalid response body: {err}"),
        )
    })
}

/// Extracts `detail` from a FastAPI-style error body.
fn error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(text) => (!text.is_empty()).then(|| text.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
