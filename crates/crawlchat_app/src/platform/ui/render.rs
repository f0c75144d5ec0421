use crawlchat_core::{AppViewModel, BackendStatus, THINKING_TEXT, WELCOME_TEXT};

use super::console::ConsoleCommand;

/// What has already been written to the terminal.
///
/// Output is append-only, so rendering emits only what changed since the last pass.
#[derive(Debug, Default)]
pub struct ScreenState {
    shown_messages: usize,
    welcome_shown: bool,
    thinking: bool,
    status: Option<String>,
    backend: BackendStatus,
}

/// Produces the console output for `view`.
///
/// `scroll` is set when the log changed since the previous pass; new entries
/// are then written after the rest of the view has been brought up to date.
pub fn render(screen: &mut ScreenState, view: &AppViewModel, scroll: bool) -> Vec<ConsoleCommand> {
    let mut cmds = Vec::new();

    if view.backend != screen.backend {
        match &view.backend {
            BackendStatus::Online => cmds.push(ConsoleCommand::Notice("Service is online.".into())),
            BackendStatus::Offline(err) => {
                cmds.push(ConsoleCommand::Notice(format!("Service unreachable: {err}")))
            }
            BackendStatus::Unknown => {}
        }
        screen.backend = view.backend.clone();
    }

    if view.status != screen.status {
        if let Some(status) = &view.status {
            cmds.push(ConsoleCommand::Status(status.clone()));
        }
        screen.status = view.status.clone();
    }

    if scroll {
        cmds.extend(scroll_to_latest(screen, view));
    }

    if view.show_thinking && !screen.thinking {
        cmds.push(ConsoleCommand::Placeholder(THINKING_TEXT));
    }
    screen.thinking = view.show_thinking;

    cmds
}

fn scroll_to_latest(screen: &mut ScreenState, view: &AppViewModel) -> Vec<ConsoleCommand> {
    let mut cmds = Vec::new();

    if view.messages.len() < screen.shown_messages {
        cmds.push(ConsoleCommand::Notice("Conversation cleared.".into()));
        screen.shown_messages = 0;
        screen.welcome_shown = false;
    }

    if view.show_welcome && !screen.welcome_shown {
        cmds.push(ConsoleCommand::Placeholder(WELCOME_TEXT));
        screen.welcome_shown = true;
    }

    cmds.extend(
        view.messages[screen.shown_messages..]
            .iter()
            .map(|m| ConsoleCommand::Message {
                role: m.role,
                text: m.text.clone(),
            }),
    );
    screen.shown_messages = view.messages.len();

    cmds
}

/// Snapshot of the session for the `/status` command.
pub fn status_report(view: &AppViewModel) -> Vec<ConsoleCommand> {
    let url_field = if view.url_input.is_empty() {
        "(empty)".to_string()
    } else {
        view.url_input.clone()
    };
    let backend = match &view.backend {
        BackendStatus::Unknown => "unknown".to_string(),
        BackendStatus::Online => "online".to_string(),
        BackendStatus::Offline(err) => format!("offline ({err})"),
    };

    vec![
        ConsoleCommand::Notice(format!(
            "Ingest: {} | URL field: {}",
            view.ingest_button_label, url_field
        )),
        ConsoleCommand::Notice(format!(
            "Chat: {} | Messages: {}",
            if view.chat_busy { "waiting for answer" } else { "ready" },
            view.messages.len()
        )),
        ConsoleCommand::Notice(format!(
            "Last status: {}",
            view.status.as_deref().unwrap_or("-")
        )),
        ConsoleCommand::Notice(format!("Service: {backend}")),
    ]
}
