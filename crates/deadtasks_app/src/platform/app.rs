use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use console_logging::{console_debug, console_info};
use deadtasks_core::{update, DeadTasksState, Msg};
use deadtasks_engine::{EngineHandle, HttpTaskStore};

use super::effects::EffectRunner;
use super::input::{self, Resolved, HELP};
use super::settings::Settings;
use super::ui;

/// Re-render at least this often so relative times stay current.
const REDRAW_INTERVAL: Duration = Duration::from_secs(1);

pub enum AppInput {
    Msg(Msg),
    Line(String),
    InputClosed,
}

pub fn run_app(settings: Settings) -> anyhow::Result<()> {
    let store = HttpTaskStore::new(settings.store_settings())?;
    let (engine, events) = EngineHandle::new(Arc::new(store));
    let (input_tx, input_rx) = mpsc::channel::<AppInput>();

    let runner = EffectRunner::new(engine, events, input_tx.clone());
    spawn_stdin_reader(input_tx);

    console_info!(
        "Watching dead tasks of queue {} at {}",
        settings.queue,
        settings.base_url
    );
    let mut console = Console::new(DeadTasksState::new(settings.list_config()), runner);
    console.dispatch_msg(Msg::Mounted);

    loop {
        match input_rx.recv_timeout(REDRAW_INTERVAL) {
            Ok(AppInput::Msg(msg)) => console.dispatch_msg(msg),
            Ok(AppInput::Line(line)) => {
                if !console.handle_line(&line) {
                    break;
                }
            }
            Ok(AppInput::InputClosed) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => console.redraw()?,
        }
        console.flush()?;
    }

    console.dispatch_msg(Msg::Unmounted);
    Ok(())
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(AppInput::Line(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(AppInput::InputClosed);
    });
}

struct Console {
    state: DeadTasksState,
    runner: EffectRunner,
    status: Option<String>,
    needs_render: bool,
}

impl Console {
    fn new(state: DeadTasksState, runner: EffectRunner) -> Self {
        Self {
            state,
            runner,
            status: Some(HELP.to_string()),
            needs_render: true,
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.needs_render = true;
        }
        self.state = state;
        self.runner.run(effects);
    }

    /// Returns false when the operator asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return true;
        }
        let command = match input::parse(line) {
            Ok(command) => command,
            Err(reason) => {
                self.set_status(reason);
                return true;
            }
        };

        let view = self.state.view(Utc::now());
        match input::resolve(command, &view) {
            Resolved::Msg(msg) => {
                console_debug!("Command {:?} -> {:?}", command, msg);
                self.status = None;
                self.needs_render = true;
                self.dispatch_msg(msg);
            }
            Resolved::Help => self.set_status(HELP.to_string()),
            Resolved::Rejected(reason) => self.set_status(reason),
            Resolved::Quit => return false,
        }
        true
    }

    fn set_status(&mut self, status: String) {
        self.status = Some(status);
        self.needs_render = true;
    }

    fn redraw(&mut self) -> io::Result<()> {
        self.needs_render = true;
        self.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        if !std::mem::take(&mut self.needs_render) {
            return Ok(());
        }
        let screen = ui::render::render(&self.state.view(Utc::now()), self.status.as_deref());
        let mut stdout = io::stdout().lock();
        // Clear screen and home the cursor before drawing.
        write!(stdout, "\x1b[2J\x1b[H{screen}> ")?;
        stdout.flush()
    }
}
