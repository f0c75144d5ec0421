pub const APP_TITLE: &str = "Crawlchat Assistant";

pub const CMD_INGEST: &str = "/ingest";
pub const CMD_DEEP: &str = "/deep";
pub const CMD_CLEAR: &str = "/clear";
pub const CMD_STATUS: &str = "/status";
pub const CMD_HELP: &str = "/help";
pub const CMD_QUIT: &str = "/quit";

pub const CLEAR_QUESTION: &str =
    "Clear all ingested content and the conversation? This cannot be undone. [y/N] ";

pub const USER_LABEL: &str = "you";
pub const BOT_LABEL: &str = "bot";
