use super::console::ConsoleCommand;
use super::constants::*;

/// Banner printed once before the first render.
pub fn initial_commands(server_url: &str) -> Vec<ConsoleCommand> {
    vec![
        ConsoleCommand::Title(APP_TITLE.to_string()),
        ConsoleCommand::Notice(format!("Service: {server_url}")),
        ConsoleCommand::Notice(format!(
            "Type a question to chat, {CMD_INGEST} <url> to ingest a site, {CMD_HELP} for more."
        )),
    ]
}

pub fn help_commands() -> Vec<ConsoleCommand> {
    [
        format!("{CMD_INGEST} [url]   ingest a single page (no url: retry the last one)"),
        format!("{CMD_DEEP} [url]     deep, multi-page ingest; slower"),
        format!("{CMD_CLEAR}          wipe ingested content and the conversation"),
        format!("{CMD_STATUS}         show input and request state"),
        format!("{CMD_HELP}           this text"),
        format!("{CMD_QUIT}           exit"),
        "anything else        ask a question".to_string(),
    ]
    .into_iter()
    .map(ConsoleCommand::Notice)
    .collect()
}
