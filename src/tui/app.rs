//! Application state and event loop

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use tokio::{
    sync::mpsc,
    time::{Interval, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use super::render::{self, PageView};
use super::theme::Theme;
use crate::{
    Result,
    api::MeasurementInput,
    page::Page,
    widgets::Measurement,
};

/// Which control has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Measurement),
    Submit,
}

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Edit(Measurement),
    Step(Measurement, i32),
    Submit,
    Quit,
}

/// Terminal-only state: focus, raw field text and the animation tick
#[derive(Debug, Clone)]
pub struct UiState {
    pub focus: Focus,
    pub fields: [String; 4],
    pub tick: u64,
}

impl UiState {
    pub fn new(input: &MeasurementInput) -> Self {
        Self {
            focus: Focus::Field(Measurement::SepalLength),
            fields: Measurement::ALL.map(|field| format_value(field.get(input))),
            tick: 0,
        }
    }

    pub fn text(&self, field: Measurement) -> &str {
        &self.fields[index_of(field)]
    }

    fn text_mut(&mut self, field: Measurement) -> &mut String {
        &mut self.fields[index_of(field)]
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Field(field) => match index_of(field) + 1 {
                i if i < Measurement::ALL.len() => Focus::Field(Measurement::ALL[i]),
                _ => Focus::Submit,
            },
            Focus::Submit => Focus::Field(Measurement::ALL[0]),
        };
    }

    fn focus_prev(&mut self) {
        let last = Measurement::ALL.len() - 1;
        self.focus = match self.focus {
            Focus::Field(field) => match index_of(field) {
                0 => Focus::Submit,
                i => Focus::Field(Measurement::ALL[i - 1]),
            },
            Focus::Submit => Focus::Field(Measurement::ALL[last]),
        };
    }

    /// Updates focus and field text, and says what else must happen.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Action::Quit;
        }

        match (key.code, self.focus) {
            (KeyCode::Tab | KeyCode::Down, _) => {
                self.focus_next();
                Action::None
            }
            (KeyCode::BackTab | KeyCode::Up, _) => {
                self.focus_prev();
                Action::None
            }
            (KeyCode::Enter, _) | (KeyCode::Char(' '), Focus::Submit) => Action::Submit,
            (KeyCode::Left, Focus::Field(field)) => Action::Step(field, -1),
            (KeyCode::Right, Focus::Field(field)) => Action::Step(field, 1),
            (KeyCode::Backspace, Focus::Field(field)) => {
                self.text_mut(field).pop();
                Action::Edit(field)
            }
            (KeyCode::Char(c), Focus::Field(field))
                if !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.text_mut(field).push(c);
                Action::Edit(field)
            }
            _ => Action::None,
        }
    }
}

fn index_of(field: Measurement) -> usize {
    Measurement::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or_default()
}

pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

const FRAME_INTERVAL: Duration = Duration::from_millis(100);
const KEY_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What woke the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    Tick,
    Closed,
}

/// Reads terminal key presses on a blocking thread and forwards them to the
/// event loop. The thread exits once the receiver is dropped.
fn spawn_key_reader() -> mpsc::Receiver<KeyEvent> {
    let (tx, rx) = mpsc::channel(32);
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(KEY_POLL_INTERVAL) {
                Ok(false) => {}
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.blocking_send(key).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(error = %e, "Failed to read terminal event");
                        break;
                    }
                },
                Err(e) => {
                    error!(error = %e, "Failed to poll terminal events");
                    break;
                }
            }
        }
        debug!("Key reader stopped");
    });
    rx
}

/// Waits for the next key press or frame tick without blocking the runtime.
pub async fn next_input(keys: &mut mpsc::Receiver<KeyEvent>, ticker: &mut Interval) -> Input {
    tokio::select! {
        key = keys.recv() => match key {
            Some(key) => Input::Key(key),
            None => Input::Closed,
        },
        _ = ticker.tick() => Input::Tick,
    }
}

/// Main application
pub struct App {
    page: Page,
    ui: UiState,
    theme: Theme,
    should_quit: bool,
}

impl App {
    pub fn new(page: Page) -> Self {
        info!("Initializing iris console for {}", page.base_url());
        let ui = UiState::new(&MeasurementInput::default());

        Self {
            page,
            ui,
            theme: Theme::default(),
            should_quit: false,
        }
    }

    /// Run the main event loop
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        let mut keys = spawn_key_reader();
        let mut ticker = tokio::time::interval(FRAME_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let health = self.page.health.snapshot();
            let model_info = self.page.model_info.state();
            let form = self.page.form.snapshot().await;
            let view = PageView {
                base_url: self.page.base_url(),
                health: &health,
                model_info: &model_info,
                form: &form,
            };

            terminal.draw(|f| render::draw(f, &view, &self.ui, &self.theme))?;

            match next_input(&mut keys, &mut ticker).await {
                Input::Key(key) => {
                    let action = self.ui.handle_key(key);
                    self.apply(action).await;
                }
                Input::Tick => self.ui.tick = self.ui.tick.wrapping_add(1),
                Input::Closed => {
                    warn!("Terminal input closed");
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        drop(keys);
        self.page.teardown();
        Ok(())
    }

    async fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Edit(field) => {
                let value = self.page.form.set_field(field, self.ui.text(field)).await;
                debug!(?field, value, "Field edited");
            }
            Action::Step(field, steps) => {
                let value = self.page.form.step_field(field, steps).await;
                *self.ui.text_mut(field) = format_value(value);
            }
            Action::Submit => {
                let form = self.page.form.clone();
                tokio::spawn(async move {
                    form.submit_if_idle().await;
                });
            }
            Action::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
        }
    }
}
