use std::io;
use std::time::Duration;

use anyhow::Context;
use console_core::{update, AppState, AppViewModel, Msg};
use console_engine::EngineHandle;
use console_logging::console_info;
use crossterm::cursor::Show;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::config::ConsoleConfig;
use super::effects::EffectRunner;
use super::input::{self, InputState, Routed};
use super::ui;

type ConsoleTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Input poll period; also bounds how long engine events wait to be applied.
const TICK_RATE: Duration = Duration::from_millis(50);

pub fn run_app(config: ConsoleConfig) -> anyhow::Result<()> {
    let settings = config
        .client_settings()
        .context("invalid server settings")?;
    console_info!("Connecting to engine at {}", settings.base_url);
    let engine = EngineHandle::new(settings).context("failed to start engine runtime")?;
    let runner = EffectRunner::new(engine);

    let _terminal_guard = TerminalGuard;
    let mut terminal = setup_terminal().context("failed to set up terminal")?;

    let mut app = ConsoleApp::new(runner);
    // Declared after `app` so the poller is cancelled before the engine runtime shuts down.
    let _poller = app.runner.start_polling(config.poll_settings());

    let result = app.run(&mut terminal);
    console_info!("Console exiting");
    result
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = disable_raw_mode();
        let _ = execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen, Show);
    }
}

fn setup_terminal() -> io::Result<ConsoleTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

struct ConsoleApp {
    state: AppState,
    view: AppViewModel,
    input: InputState,
    runner: EffectRunner,
    needs_draw: bool,
    quit: bool,
}

impl ConsoleApp {
    fn new(runner: EffectRunner) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            input: InputState::default(),
            runner,
            needs_draw: true,
            quit: false,
        }
    }

    fn run(&mut self, terminal: &mut ConsoleTerminal) -> anyhow::Result<()> {
        while !self.quit {
            for msg in self.runner.drain() {
                self.dispatch_msg(msg);
            }

            if self.needs_draw {
                terminal
                    .draw(|frame| ui::render::render(frame, &self.view, &self.input))
                    .context("failed to draw")?;
                self.needs_draw = false;
            }

            if event::poll(TICK_RATE).context("failed to poll terminal events")? {
                let event = event::read().context("failed to read terminal event")?;
                self.handle_event(event);
            } else {
                self.dispatch_msg(Msg::Tick);
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let routed = match event {
            Event::Key(key) => self.route_key(key),
            Event::Paste(text) => input::handle_paste(&mut self.input, &self.view, &text),
            Event::Resize(_, _) => Routed {
                redraw: true,
                ..Routed::default()
            },
            _ => Routed::default(),
        };
        self.apply_routed(routed);
    }

    fn route_key(&mut self, key: KeyEvent) -> Routed {
        input::handle_key(&mut self.input, &self.view, key)
    }

    fn apply_routed(&mut self, routed: Routed) {
        self.quit |= routed.quit;
        self.needs_draw |= routed.redraw;
        for msg in routed.msgs {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        if state.consume_dirty() {
            self.view = view;
            self.needs_draw = true;
        }
        self.state = state;
        self.runner.enqueue(effects);
    }
}
