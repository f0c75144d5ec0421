use std::sync::Once;

use crawlchat_core::{update, AppState, ChatOutcome, Effect, IngestMode, Msg, Role};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn send_query(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::QueryInputChanged(input.to_string()));
    update(state, Msg::SendClicked)
}

fn roles_and_texts(state: &AppState) -> Vec<(Role, String)> {
    state
        .log()
        .iter()
        .map(|m| (m.role(), m.text().to_string()))
        .collect()
}

#[test]
fn blank_query_is_ignored() {
    init_logging();
    for input in ["", "  ", "\n"] {
        let (state, _) = update(AppState::new(), Msg::QueryInputChanged(input.to_string()));
        let before = state.clone();
        let (next, effects) = update(state, Msg::SendClicked);

        assert_eq!(next, before);
        assert!(effects.is_empty());
    }
}

#[test]
fn user_message_is_appended_before_response() {
    init_logging();
    let (state, effects) = send_query(AppState::new(), "What is this site about?");

    assert_eq!(
        roles_and_texts(&state),
        vec![(Role::User, "What is this site about?".to_string())]
    );
    assert_eq!(state.query_input(), "");
    assert!(state.chat_busy());
    assert_eq!(
        effects,
        vec![
            Effect::ScrollToLatest { revision: 1 },
            Effect::SendChat {
                message: "What is this site about?".to_string(),
            },
        ]
    );

    let (state, effects) = update(
        state,
        Msg::ChatDone {
            result: Ok(ChatOutcome {
                response: "It's an example domain.".to_string(),
            }),
        },
    );

    assert_eq!(
        roles_and_texts(&state),
        vec![
            (Role::User, "What is this site about?".to_string()),
            (Role::Bot, "It's an example domain.".to_string()),
        ]
    );
    assert!(!state.chat_busy());
    assert_eq!(effects, vec![Effect::ScrollToLatest { revision: 2 }]);
}

#[test]
fn query_text_is_sent_verbatim() {
    init_logging();
    let (state, effects) = send_query(AppState::new(), "  spaced  ");

    assert_eq!(state.log().last().map(|m| m.text()), Some("  spaced  "));
    assert!(effects.contains(&Effect::SendChat {
        message: "  spaced  ".to_string()
    }));
}

#[test]
fn failure_appends_prefixed_bot_message() {
    init_logging();
    let (state, _) = send_query(AppState::new(), "hello");
    let (state, effects) = update(
        state,
        Msg::ChatDone {
            result: Err("http status 500: model offline".to_string()),
        },
    );

    assert_eq!(
        roles_and_texts(&state),
        vec![
            (Role::User, "hello".to_string()),
            (Role::Bot, "Error: http status 500: model offline".to_string()),
        ]
    );
    assert!(!state.chat_busy());
    assert_eq!(effects.len(), 1);
}

#[test]
fn second_send_while_busy_is_noop() {
    init_logging();
    let (state, _) = send_query(AppState::new(), "first");
    let before = state.clone();

    let (state, effects) = update(state, Msg::QueryInputChanged("second".into()));
    assert_eq!(state, before);
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::SendClicked);
    assert_eq!(state, before);
    assert!(effects.is_empty());
    assert_eq!(state.log().len(), 1);
}

#[test]
fn exactly_one_bot_message_per_round_trip() {
    init_logging();
    let (state, _) = send_query(AppState::new(), "q");
    let reply = Msg::ChatDone {
        result: Ok(ChatOutcome {
            response: "a".to_string(),
        }),
    };
    let (state, _) = update(state, reply.clone());
    // A duplicate settlement must not append a second answer.
    let (state, effects) = update(state, reply);

    assert_eq!(state.log().len(), 2);
    assert!(effects.is_empty());
}

#[test]
fn chat_is_independent_of_ingest() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::UrlInputChanged("https://example.com".into()));
    let (state, _) = update(state, Msg::IngestClicked {
        mode: IngestMode::Deep,
    });
    assert!(state.ingest_busy());

    let (state, effects) = send_query(state, "still there?");
    assert!(state.chat_busy());
    assert!(state.ingest_busy());
    assert_eq!(effects.len(), 2);
}

#[test]
fn ingest_feedback_never_enters_the_log() {
    init_logging();
    let (state, _) = send_query(AppState::new(), "q");
    let (state, _) = update(
        state,
        Msg::ChatDone {
            result: Ok(ChatOutcome {
                response: "a".to_string(),
            }),
        },
    );
    let (state, _) = update(state, Msg::UrlInputChanged("https://example.com".into()));
    let (state, _) = update(state, Msg::IngestClicked {
        mode: IngestMode::Standard,
    });
    let (state, _) = update(
        state,
        Msg::IngestDone {
            mode: IngestMode::Standard,
            result: Err("timeout".to_string()),
        },
    );

    assert_eq!(state.log().len(), 2);
    assert_eq!(state.log().revision(), 2);
}

#[test]
fn chat_failure_keeps_ingest_banner() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::UrlInputChanged("https://example.com".into()));
    let (state, _) = update(state, Msg::IngestClicked {
        mode: IngestMode::Standard,
    });
    let (state, _) = update(
        state,
        Msg::IngestDone {
            mode: IngestMode::Standard,
            result: Ok(crawlchat_core::IngestOutcome {
                status: Some("success".to_string()),
                message: Some("Ingested 1 page".to_string()),
            }),
        },
    );

    let (state, _) = send_query(state, "q");
    let (state, _) = update(
        state,
        Msg::ChatDone {
            result: Err("connection refused".to_string()),
        },
    );

    assert_eq!(state.status(), "Ingested 1 page");
    assert_eq!(state.log().len(), 2);
}
