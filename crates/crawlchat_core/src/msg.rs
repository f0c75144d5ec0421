#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestMode {
    /// Single page.
    Standard,
    /// Multi-page crawl; noticeably slower.
    Deep,
}

/// Parsed reply of an ingest endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IngestOutcome {
    pub status: Option<String>,
    pub message: Option<String>,
}

impl IngestOutcome {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClearOutcome {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    pub response: String,
}

/// Inputs to the state machine. Failures carry the error description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Front end finished setting up.
    Started,
    /// User edited the URL input.
    UrlInputChanged(String),
    /// User edited the chat input.
    QueryInputChanged(String),
    /// User clicked Ingest or Deep Ingest.
    IngestClicked { mode: IngestMode },
    /// User clicked Clear Memory.
    ClearClicked,
    /// Answer to the clear confirmation prompt.
    ClearConfirmed { confirmed: bool },
    /// User clicked Send (or pressed Enter in the chat input).
    SendClicked,
    /// Ingest request settled.
    IngestDone {
        mode: IngestMode,
        result: Result<IngestOutcome, String>,
    },
    /// Clear request settled.
    ClearDone { result: Result<ClearOutcome, String> },
    /// Chat request settled.
    ChatDone { result: Result<ChatOutcome, String> },
    /// Health check settled. `Ok` carries the reported status string.
    HealthChecked { result: Result<String, String> },
}
