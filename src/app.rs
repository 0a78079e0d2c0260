//! Root application component
//!
//! The App owns all page state (file selection and submission lifecycle)
//! and delegates event handling and rendering to child components.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_page_layout, FilePicker, HelpDialog, PickerContext, QuitDialog, ReportView,
};
use crate::config::Config;
use crate::error::ValidationError;
use crate::model::modal::{Modal, ModalStack};
use crate::model::FileCandidate;
use crate::model::FileSelector;
use crate::services::{Analyzer, SubmissionController};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Main application state
pub struct App {
    pub config: Config,

    /// Current resume selection or its validation error
    pub files: FileSelector,

    /// Request lifecycle and the received report
    pub submission: SubmissionController,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Advances on every tick while a request is running
    spinner_frame: usize,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub picker: FilePicker,
    pub report: ReportView,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    pub fn new(config: Config, analyzer: Arc<dyn Analyzer>) -> Result<App> {
        Ok(App {
            config,
            files: FileSelector::new(),
            submission: SubmissionController::new(analyzer)?,
            modals: ModalStack::new(),
            should_quit: false,
            spinner_frame: 0,
            picker: FilePicker::new(),
            report: ReportView::new(),
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog,
        })
    }

    /// Run a typed or command-line path through the file selector
    pub fn select_path(&mut self, raw: &str) {
        let path = expand_home(raw.trim());
        if !path.is_file() {
            self.files
                .reject(ValidationError::NotFound(path.display().to_string()));
            return;
        }
        // The error is held by the selector and shown in the picker
        if self.files.select(FileCandidate::from_path(&path)).is_ok() {
            self.submission.clear_failure();
        }
    }

    /// Submit is enabled only with a valid file and nothing in flight
    pub fn can_submit(&self) -> bool {
        self.submission.can_submit(self.files.selected())
    }

    /// Text for the inline error slot
    pub fn error_message(&self) -> Option<String> {
        self.files
            .error()
            .map(|e| e.to_string())
            .or_else(|| self.submission.state().error().map(str::to_string))
    }

    fn handle_page_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('o') | KeyCode::Char('/') => Some(Action::EditPath),
            KeyCode::Enter | KeyCode::Char('a') if self.can_submit() => Some(Action::Submit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let content = vec![
            Line::from(Span::styled(
                "Resume Analyzer",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Instant ATS feedback and recommendations for your resume",
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                self.config.endpoint.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let spans = if self.picker.editing {
            vec![
                Span::styled(" Enter ", key_style),
                Span::raw("Choose  "),
                Span::styled(" Esc ", key_style),
                Span::raw("Cancel"),
            ]
        } else {
            vec![
                Span::styled(" o ", key_style),
                Span::raw("Choose file  "),
                Span::styled(" Enter ", key_style),
                Span::raw("Analyze  "),
                Span::styled(" j/k ", key_style),
                Span::raw("Scroll  "),
                Span::styled(" ? ", key_style),
                Span::raw("Help  "),
                Span::styled(" q ", key_style),
                Span::raw("Quit"),
            ]
        };

        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(raw),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else if self.picker.editing {
            self.picker.handle_key_event(key)
        } else {
            self.handle_page_key_event(key)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.submission.is_loading() {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
                if self.submission.poll() {
                    self.report.reset_scroll();
                }
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // File Selection (picker owns the input, selector owns the result)
            // ─────────────────────────────────────────────────────────────────
            Action::SelectFile(path) => {
                self.select_path(&path);
                self.picker.update(Action::SelectFile(path))?;
            }
            Action::EditPath | Action::PathInput(_) | Action::PathBackspace | Action::CancelPath => {
                self.picker.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Submission
            // ─────────────────────────────────────────────────────────────────
            Action::Submit => {
                if self.submission.submit(self.files.selected()) {
                    self.spinner_frame = 0;
                    self.report.reset_scroll();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Scrolling (delegate to ReportView)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                self.report.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.request_in_flight = self.submission.is_loading();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => self.modals.push(Modal::Help),
            Action::CloseModal => {
                self.modals.pop();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_page_layout(area);

        self.draw_header(frame, layout.header);

        let error = self.error_message();
        let ctx = PickerContext {
            selected: self.files.selected(),
            error: error.as_deref(),
            can_submit: self.can_submit(),
            loading: self.submission.is_loading(),
            elapsed_secs: self.submission.elapsed_secs(),
            spinner_frame: self.spinner_frame,
        };
        self.picker.draw_with_context(frame, layout.picker, &ctx)?;

        self.report.draw_with_state(
            frame,
            layout.report,
            self.submission.state(),
            self.submission.completed_at(),
        )?;

        self.draw_help_bar(frame, layout.help);

        if let Some(modal) = self.modals.top().cloned() {
            match modal {
                Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
                Modal::Help => self.help_dialog.draw(frame, area)?,
            }
        }
        Ok(())
    }
}
