use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use crawlchat_core::{update, AppState, Effect, Msg};
use crawlchat_engine::EngineHandle;
use engine_logging::{engine_info, engine_trace, engine_warn};

use super::commands::{self, Action};
use super::config::Cli;
use super::effects::EffectRunner;
use super::ui;
use super::ui::console::{Console, ConsoleCommand};
use super::ui::render::ScreenState;

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    engine_logging::initialize(&cli.log_destination(), cli.log_level.into());

    let settings = cli
        .client_settings()
        .with_context(|| format!("invalid server url {:?}", cli.server_url))?;
    engine_info!(
        "starting against {} (request timeout {:?})",
        settings.base_url,
        settings.request_timeout
    );
    let banner = ui::layout::initial_commands(settings.base_url.as_str());
    let engine = EngineHandle::new(settings).context("failed to start request engine")?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    spawn_input_reader(io::BufReader::new(io::stdin()), event_tx.clone());
    let runner = EffectRunner::new(engine, event_tx);

    let stdout = io::stdout();
    let mut handler = AppEventHandler::new(runner, Console::new(stdout.lock()), event_rx);
    handler.start(&banner)?;
    while let Some(event) = handler.next_event() {
        if handler.handle_event(event)? == Flow::Quit {
            break;
        }
    }
    engine_info!("shutting down");
    Ok(())
}

/// Everything the UI thread reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// One line typed by the user.
    Line(String),
    /// Stdin reached EOF or failed.
    InputClosed,
    /// A settled request, already translated for the core.
    Msg(Msg),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn spawn_input_reader<R>(reader: R, event_tx: mpsc::Sender<AppEvent>)
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if event_tx.send(AppEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    engine_warn!("stdin read failed: {}", err);
                    break;
                }
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

/// Owns the session state and is the only writer to it.
struct AppEventHandler<W: Write> {
    state: AppState,
    runner: EffectRunner,
    console: Console<W>,
    screen: ScreenState,
    event_rx: mpsc::Receiver<AppEvent>,
    // Completions that arrived while a confirmation prompt was blocking.
    deferred: VecDeque<Msg>,
    scroll_pending: bool,
}

impl<W: Write> AppEventHandler<W> {
    fn new(runner: EffectRunner, console: Console<W>, event_rx: mpsc::Receiver<AppEvent>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            console,
            screen: ScreenState::default(),
            event_rx,
            deferred: VecDeque::new(),
            scroll_pending: false,
        }
    }

    fn start(&mut self, banner: &[ConsoleCommand]) -> io::Result<()> {
        self.console.execute(banner)?;
        self.scroll_pending = true;
        self.render()?;
        self.dispatch_msg(Msg::Started)
    }

    fn next_event(&mut self) -> Option<AppEvent> {
        if let Some(msg) = self.deferred.pop_front() {
            return Some(AppEvent::Msg(msg));
        }
        self.event_rx.recv().ok()
    }

    fn handle_event(&mut self, event: AppEvent) -> io::Result<Flow> {
        match event {
            AppEvent::Msg(msg) => {
                self.dispatch_msg(msg)?;
                Ok(Flow::Continue)
            }
            AppEvent::Line(line) => self.handle_line(&line),
            AppEvent::InputClosed => Ok(Flow::Quit),
        }
    }

    fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let view = self.state.view();
        match commands::plan(commands::parse_line(line), &view) {
            Action::Dispatch(msgs) => {
                for msg in msgs {
                    self.dispatch_msg(msg)?;
                }
            }
            Action::Refuse(reason) => self.console.execute(&[ConsoleCommand::Notice(reason)])?,
            Action::Status => self.console.execute(&ui::render::status_report(&view))?,
            Action::Help => self.console.execute(&ui::layout::help_commands())?,
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            engine_trace!("dispatch {:?}", msg);
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;

            for effect in effects {
                match effect {
                    Effect::ScrollToLatest { revision } => {
                        engine_trace!("log revision {}", revision);
                        self.scroll_pending = true;
                    }
                    Effect::ConfirmClear => {
                        let confirmed = self.confirm(ui::constants::CLEAR_QUESTION)?;
                        queue.push_back(Msg::ClearConfirmed { confirmed });
                    }
                    other => self.runner.enqueue(other),
                }
            }

            if self.state.consume_dirty() || self.scroll_pending {
                self.render()?;
            }
        }
        Ok(())
    }

    /// Blocks the UI thread until the user answers; EOF counts as no.
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.console
            .execute(&[ConsoleCommand::Prompt(question.to_string())])?;
        loop {
            match self.event_rx.recv() {
                Ok(AppEvent::Line(line)) => return Ok(commands::parse_confirmation(&line)),
                Ok(AppEvent::Msg(msg)) => self.deferred.push_back(msg),
                Ok(AppEvent::InputClosed) | Err(_) => return Ok(false),
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let view = self.state.view();
        let scroll = std::mem::take(&mut self.scroll_pending);
        let cmds = ui::render::render(&mut self.screen, &view, scroll);
        self.console.execute(&cmds)
    }
}
