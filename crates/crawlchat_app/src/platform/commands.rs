//! Typed input lines and how they map onto core messages.

use crawlchat_core::{AppViewModel, IngestMode, Msg};

use super::ui::constants::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `None` resubmits whatever the URL field still holds.
    Ingest {
        mode: IngestMode,
        url: Option<String>,
    },
    Clear,
    Status,
    Help,
    Quit,
    Chat(String),
    Unknown(String),
}

pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return Command::Chat(line.to_string());
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    match name {
        CMD_INGEST => Command::Ingest {
            mode: IngestMode::Standard,
            url: argument,
        },
        CMD_DEEP => Command::Ingest {
            mode: IngestMode::Deep,
            url: argument,
        },
        CMD_CLEAR => Command::Clear,
        CMD_STATUS => Command::Status,
        CMD_HELP => Command::Help,
        CMD_QUIT | "/exit" => Command::Quit,
        _ => Command::Unknown(name.to_string()),
    }
}

/// Yes only on an explicit `y`/`yes`.
pub fn parse_confirmation(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Dispatch(Vec<Msg>),
    /// The targeted input surface is disabled; nothing is sent to the core.
    Refuse(String),
    Status,
    Help,
    Quit,
}

/// Decides what a command does given what the view currently allows.
pub fn plan(command: Command, view: &AppViewModel) -> Action {
    match command {
        Command::Ingest { mode, url } => {
            if !view.can_edit_url {
                return Action::Refuse(
                    "An ingest or clear is still running; the URL input is disabled.".into(),
                );
            }
            let mut msgs = Vec::with_capacity(2);
            if let Some(url) = url {
                msgs.push(Msg::UrlInputChanged(url));
            } else if view.url_input.trim().is_empty() {
                return Action::Refuse(format!("Usage: {CMD_INGEST} <url> or {CMD_DEEP} <url>"));
            }
            msgs.push(Msg::IngestClicked { mode });
            Action::Dispatch(msgs)
        }
        Command::Clear => {
            if !view.can_clear {
                return Action::Refuse(
                    "An ingest or clear is still running; clearing is disabled.".into(),
                );
            }
            Action::Dispatch(vec![Msg::ClearClicked])
        }
        Command::Chat(text) => {
            if !view.can_edit_query {
                return Action::Refuse("Still waiting for the previous answer.".into());
            }
            Action::Dispatch(vec![Msg::QueryInputChanged(text), Msg::SendClicked])
        }
        Command::Status => Action::Status,
        Command::Help => Action::Help,
        Command::Quit => Action::Quit,
        Command::Unknown(name) => {
            Action::Refuse(format!("Unknown command {name}. Type {CMD_HELP} for a list."))
        }
    }
}
