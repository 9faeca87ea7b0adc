//! Main TUI application state machine.
//!
//! Handles:
//! - Focus between the category sidebar and the form
//! - Input event handling
//! - Synchronous dispatch on submit, after a frame showing its progress

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::application::Dispatcher;
use crate::domain::{DiseaseCategory, FeatureVector};

use super::ui::{
    form::{render_form, FormState},
    render_disclaimer, render_header,
    result::{render_result, ResultState},
    sidebar::render_sidebar,
};

/// Shown instead of internal error details.
const GENERIC_FAILURE: &str = "Unable to complete the assessment. Please try again.";

/// Which panel receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Form,
}

/// Main application state
pub struct App {
    dispatcher: Dispatcher,

    /// Whether the app should quit
    should_quit: bool,

    focus: Focus,

    /// Selected category
    category: DiseaseCategory,

    /// One form per category, indexed by `DiseaseCategory::index`
    forms: [FormState; 5],

    /// Result for the selected category
    result: ResultState,

    /// Submitted vector waiting for dispatch
    pending: Option<FeatureVector>,
}

impl App {
    /// Create application with a ready dispatcher.
    ///
    /// All models must already be loaded; the UI never starts without them.
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            should_quit: false,
            focus: Focus::Sidebar,
            category: DiseaseCategory::Diabetes,
            forms: DiseaseCategory::ALL.map(FormState::new),
            result: ResultState::Idle,
            pending: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.pending.is_some() {
                // Show the progress line before the model runs.
                terminal.draw(|f| self.draw(f))?;
                self.run_pending();
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Disclaimer
            ])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(rows[1]);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(columns[1]);

        render_header(f, rows[0]);
        render_sidebar(f, columns[0], self.category, self.focus == Focus::Sidebar);
        render_form(f, main[0], self.form(), self.focus == Focus::Form);
        render_result(f, main[1], &self.result);
        render_disclaimer(f, rows[2]);
    }

    #[must_use]
    pub fn category(&self) -> DiseaseCategory {
        self.category
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub fn result(&self) -> &ResultState {
        &self.result
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.forms[self.category.index()]
    }

    fn form_mut(&mut self) -> &mut FormState {
        &mut self.forms[self.category.index()]
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::Form => self.handle_form_key(key),
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.select_category(self.category.prev()),
            KeyCode::Down => self.select_category(self.category.next()),
            KeyCode::Tab | KeyCode::Right | KeyCode::Enter => {
                self.focus = Focus::Form;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.form_mut().commit_all();
                self.focus = Focus::Sidebar;
            }
            KeyCode::Up => self.form_mut().prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_mut().next_field(),
            KeyCode::Char('+') => self.form_mut().step(1.0),
            KeyCode::Char('-') => self.form_mut().step(-1.0),
            KeyCode::Char('s') | KeyCode::Char('S') => self.form_mut().load_sample_data(),
            KeyCode::Char(c) => self.form_mut().input_char(c),
            KeyCode::Backspace => self.form_mut().delete_char(),
            KeyCode::Delete => self.form_mut().clear_field(),
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    fn select_category(&mut self, category: DiseaseCategory) {
        if category != self.category {
            self.category = category;
            self.result = ResultState::Idle;
        }
    }

    fn submit_form(&mut self) {
        let form = self.form_mut();
        form.commit_all();

        let features = match form.to_feature_vector() {
            Ok(features) => features,
            Err(e) => {
                form.error_message = Some(e.to_string());
                return;
            }
        };

        self.result = ResultState::Running {
            message: features.category().progress_message(),
        };
        self.pending = Some(features);
    }

    /// Dispatch the submitted vector, if any.
    pub fn run_pending(&mut self) {
        let Some(features) = self.pending.take() else {
            return;
        };

        self.result = match self.dispatcher.dispatch(&features) {
            Ok(prediction) => ResultState::Complete { prediction },
            Err(e) => {
                tracing::error!(category = %features.category(), "Assessment failed: {}", e);
                ResultState::Error {
                    message: GENERIC_FAILURE.to_string(),
                }
            }
        };
    }
}
