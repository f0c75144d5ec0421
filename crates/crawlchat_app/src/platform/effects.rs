use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crawlchat_core::{ChatOutcome, ClearOutcome, Effect, IngestMode, IngestOutcome, Msg};
use crawlchat_engine::{CrawlDepth, EngineEvent, EngineHandle};
use engine_logging::{engine_info, engine_trace};

use super::app::AppEvent;

/// Executes network effects on the engine and feeds completions back as `Msg`s.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx);
        runner
    }

    pub fn enqueue(&self, effect: Effect) {
        match effect {
            Effect::Ingest { url, mode } => {
                engine_info!("Ingest mode={:?} url_len={} url={}", mode, url.len(), url);
                self.engine.ingest(url, map_mode(mode));
            }
            Effect::ClearMemory => self.engine.clear(),
            Effect::SendChat { message } => {
                engine_info!("SendChat message_len={}", message.len());
                self.engine.chat(message);
            }
            Effect::CheckHealth => self.engine.check_health(),
            Effect::ConfirmClear | Effect::ScrollToLatest { .. } => {
                // UI-thread effects; the event handler deals with these itself.
                engine_trace!("ignoring UI effect {:?}", effect);
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(Duration::from_millis(100)) {
                if event_tx.send(AppEvent::Msg(map_event(event))).is_err() {
                    break;
                }
            }
        });
    }
}

fn map_mode(mode: IngestMode) -> CrawlDepth {
    match mode {
        IngestMode::Standard => CrawlDepth::Shallow,
        IngestMode::Deep => CrawlDepth::Deep,
    }
}

fn map_depth(depth: CrawlDepth) -> IngestMode {
    match depth {
        CrawlDepth::Shallow => IngestMode::Standard,
        CrawlDepth::Deep => IngestMode::Deep,
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::IngestCompleted { depth, result } => Msg::IngestDone {
            mode: map_depth(depth),
            result: result
                .map(|reply| IngestOutcome {
                    status: reply.status,
                    message: reply.message,
                })
                .map_err(|err| err.to_string()),
        },
        EngineEvent::ClearCompleted { result } => Msg::ClearDone {
            result: result
                .map(|reply| ClearOutcome {
                    message: reply.message,
                })
                .map_err(|err| err.to_string()),
        },
        EngineEvent::ChatCompleted { result } => Msg::ChatDone {
            result: result
                .map(|reply| ChatOutcome {
                    response: reply.response,
                })
                .map_err(|err| err.to_string()),
        },
        EngineEvent::HealthCompleted { result } => Msg::HealthChecked {
            result: result.map(|reply| reply.status).map_err(|err| err.to_string()),
        },
    }
}
