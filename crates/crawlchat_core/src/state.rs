use crate::view_model::{AppViewModel, MessageView};
use crate::{ConversationLog, IngestMode, Message};

/// Reachability of the remote service as last observed by a health check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Online,
    Offline(String),
}

/// What currently holds the ingestion-family slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum IngestActivity {
    #[default]
    Idle,
    Ingesting(IngestMode),
    Clearing,
}

/// UI session state, exclusively owned by the front end and threaded through `update`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url_input: String,
    query_input: String,
    ingest: IngestActivity,
    // Log epoch captured when the in-flight chat was sent.
    chat_pending: Option<u64>,
    confirm_pending: bool,
    status: String,
    log: ConversationLog,
    backend: BackendStatus,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let ingest_busy = self.ingest_busy();
        let chat_busy = self.chat_busy();
        AppViewModel {
            url_input: self.url_input.clone(),
            query_input: self.query_input.clone(),
            ingest_busy,
            chat_busy,
            can_edit_url: !ingest_busy,
            can_ingest: !ingest_busy && !is_blank(&self.url_input),
            can_clear: !ingest_busy,
            can_edit_query: !chat_busy,
            can_send: !chat_busy && !is_blank(&self.query_input),
            ingest_button_label: if ingest_busy {
                "Processing..."
            } else {
                "Ingest Site"
            },
            status: (!self.status.is_empty()).then(|| self.status.clone()),
            messages: self
                .log
                .iter()
                .map(|m| MessageView {
                    role: m.role(),
                    text: m.text().to_string(),
                })
                .collect(),
            show_welcome: self.log.is_empty(),
            show_thinking: chat_busy,
            backend: self.backend.clone(),
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn query_input(&self) -> &str {
        &self.query_input
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn ingest_busy(&self) -> bool {
        self.ingest != IngestActivity::Idle
    }

    pub fn chat_busy(&self) -> bool {
        self.chat_pending.is_some()
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn ingest_activity(&self) -> IngestActivity {
        self.ingest
    }

    pub(crate) fn set_ingest_activity(&mut self, activity: IngestActivity) {
        self.ingest = activity;
        self.mark_dirty();
    }

    /// Marks chat busy, remembering which log epoch the question belongs to.
    pub(crate) fn begin_chat(&mut self) {
        self.chat_pending = Some(self.log.epoch());
        self.mark_dirty();
    }

    /// Releases chat busy. Returns whether the question is still in the log.
    pub(crate) fn finish_chat(&mut self) -> bool {
        let sent_in = self.chat_pending.take();
        self.mark_dirty();
        sent_in == Some(self.log.epoch())
    }

    pub(crate) fn confirm_pending(&self) -> bool {
        self.confirm_pending
    }

    pub(crate) fn set_confirm_pending(&mut self, pending: bool) {
        self.confirm_pending = pending;
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_query_input(&mut self, text: String) {
        if self.query_input != text {
            self.query_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>) {
        self.status = text.into();
        self.mark_dirty();
    }

    pub(crate) fn set_backend(&mut self, backend: BackendStatus) {
        if self.backend != backend {
            self.backend = backend;
            self.mark_dirty();
        }
    }

    /// Appends to the log and returns the new revision.
    pub(crate) fn append(&mut self, message: Message) -> u64 {
        self.mark_dirty();
        self.log.push(message)
    }

    pub(crate) fn reset_log(&mut self) -> u64 {
        self.mark_dirty();
        self.log.reset()
    }
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
