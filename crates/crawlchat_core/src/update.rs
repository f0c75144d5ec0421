use crate::state::{is_blank, IngestActivity};
use crate::{AppState, BackendStatus, Effect, IngestMode, Message, Msg};

const STANDARD_PROGRESS: &str = "Crawling and ingesting content...";
const DEEP_PROGRESS: &str =
    "Deep crawling multiple pages. This is slower than a standard ingest, please wait...";
const STANDARD_FALLBACK: &str = "Crawl successful!";
const DEEP_FALLBACK: &str = "Deep crawl successful!";
const CLEAR_PROGRESS: &str = "Clearing memory...";
const CLEAR_FALLBACK: &str = "Memory cleared.";
const HEALTHY: &str = "healthy";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::CheckHealth],
        Msg::UrlInputChanged(text) => {
            // The URL input is disabled while an ingestion-family request is in flight.
            if !state.ingest_busy() {
                state.set_url_input(text);
            }
            Vec::new()
        }
        Msg::QueryInputChanged(text) => {
            if !state.chat_busy() {
                state.set_query_input(text);
            }
            Vec::new()
        }
        Msg::IngestClicked { mode } => {
            if state.ingest_busy() || is_blank(state.url_input()) {
                return (state, Vec::new());
            }
            let url = state.url_input().trim().to_string();
            state.set_ingest_activity(IngestActivity::Ingesting(mode));
            state.set_status(match mode {
                IngestMode::Standard => STANDARD_PROGRESS,
                IngestMode::Deep => DEEP_PROGRESS,
            });
            vec![Effect::Ingest { url, mode }]
        }
        Msg::ClearClicked => {
            if state.ingest_busy() {
                return (state, Vec::new());
            }
            state.set_confirm_pending(true);
            vec![Effect::ConfirmClear]
        }
        Msg::ClearConfirmed { confirmed } => {
            if !state.confirm_pending() {
                return (state, Vec::new());
            }
            state.set_confirm_pending(false);
            if !confirmed || state.ingest_busy() {
                return (state, Vec::new());
            }
            state.set_ingest_activity(IngestActivity::Clearing);
            state.set_status(CLEAR_PROGRESS);
            vec![Effect::ClearMemory]
        }
        Msg::SendClicked => {
            if state.chat_busy() || is_blank(state.query_input()) {
                return (state, Vec::new());
            }
            let message = state.query_input().to_string();
            let revision = state.append(Message::user(message.clone()));
            state.set_query_input(String::new());
            state.begin_chat();
            vec![
                Effect::ScrollToLatest { revision },
                Effect::SendChat { message },
            ]
        }
        Msg::IngestDone { mode, result } => {
            if state.ingest_activity() != IngestActivity::Ingesting(mode) {
                return (state, Vec::new());
            }
            match result {
                Ok(outcome) => {
                    if outcome.is_success() {
                        state.set_url_input(String::new());
                    }
                    let fallback = match mode {
                        IngestMode::Standard => STANDARD_FALLBACK,
                        IngestMode::Deep => DEEP_FALLBACK,
                    };
                    state.set_status(non_empty_or(outcome.message, fallback));
                }
                Err(err) => {
                    let label = match mode {
                        IngestMode::Standard => "Crawl",
                        IngestMode::Deep => "Deep crawl",
                    };
                    state.set_status(format!("{label} failed: {err}"));
                }
            }
            state.set_ingest_activity(IngestActivity::Idle);
            Vec::new()
        }
        Msg::ClearDone { result } => {
            if state.ingest_activity() != IngestActivity::Clearing {
                return (state, Vec::new());
            }
            state.set_ingest_activity(IngestActivity::Idle);
            match result {
                Ok(outcome) => {
                    state.set_status(non_empty_or(outcome.message, CLEAR_FALLBACK));
                    let revision = state.reset_log();
                    vec![Effect::ScrollToLatest { revision }]
                }
                Err(err) => {
                    state.set_status(format!("Clear failed: {err}"));
                    Vec::new()
                }
            }
        }
        Msg::ChatDone { result } => {
            if !state.chat_busy() {
                return (state, Vec::new());
            }
            // The log was cleared after the question was sent; the answer has nothing to follow.
            if !state.finish_chat() {
                return (state, Vec::new());
            }
            let reply = match result {
                Ok(outcome) => Message::bot(outcome.response),
                Err(err) => Message::bot(format!("Error: {err}")),
            };
            let revision = state.append(reply);
            vec![Effect::ScrollToLatest { revision }]
        }
        Msg::HealthChecked { result } => {
            state.set_backend(match result {
                Ok(status) if status == HEALTHY => BackendStatus::Online,
                Ok(status) => BackendStatus::Offline(format!("unexpected status {status}")),
                Err(err) => BackendStatus::Offline(err),
            });
            Vec::new()
        }
    };

    (state, effects)
}

fn non_empty_or(message: Option<String>, fallback: &str) -> String {
    message
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
