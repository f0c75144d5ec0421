use crate::{BackendStatus, Role};

/// Greeting shown in place of an empty conversation.
pub const WELCOME_TEXT: &str =
    "Hello! I'm your AI assistant. Ingest a website above and ask me anything about it.";

/// Transient tail entry while a chat request is in flight. Not part of the log.
pub const THINKING_TEXT: &str = "Thinking...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url_input: String,
    pub query_input: String,
    pub ingest_busy: bool,
    pub chat_busy: bool,
    pub can_edit_url: bool,
    pub can_ingest: bool,
    pub can_clear: bool,
    pub can_edit_query: bool,
    pub can_send: bool,
    pub ingest_button_label: &'static str,
    pub status: Option<String>,
    pub messages: Vec<MessageView>,
    pub show_welcome: bool,
    pub show_thinking: bool,
    pub backend: BackendStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub role: Role,
    pub text: String,
}
