use crate::IngestMode;

/// Side effects requested by `update`. The platform layer executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the captured URL to the standard or deep ingest endpoint.
    Ingest { url: String, mode: IngestMode },
    /// Ask the user a blocking yes/no question before clearing memory.
    ConfirmClear,
    /// POST to the clear endpoint.
    ClearMemory,
    /// POST the captured query text to the chat endpoint.
    SendChat { message: String },
    /// The conversation log changed; bring its newest entry into view.
    ScrollToLatest { revision: u64 },
    /// Query the service health endpoint.
    CheckHealth,
}
