//! Crawlchat core: pure interaction state machine and view-model helpers.
mod conversation;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use conversation::{ConversationLog, Message, Role};
pub use effect::Effect;
pub use msg::{ChatOutcome, ClearOutcome, IngestMode, IngestOutcome, Msg};
pub use state::{AppState, BackendStatus};
pub use update::update;
pub use view_model::{AppViewModel, MessageView, THINKING_TEXT, WELCOME_TEXT};
