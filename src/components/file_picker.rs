//! Resume file picker
//!
//! Path input restricted to `.pdf` / `.docx`, the current selection, the
//! inline error slot, and the submit button.

use crate::action::Action;
use crate::component::Component;
use crate::model::SelectedFile;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Everything the picker shows that it does not own
pub struct PickerContext<'a> {
    pub selected: Option<&'a SelectedFile>,
    pub error: Option<&'a str>,
    pub can_submit: bool,
    pub loading: bool,
    pub elapsed_secs: Option<f64>,
    pub spinner_frame: usize,
}

#[derive(Default)]
pub struct FilePicker {
    /// Whether keystrokes go to the path input
    pub editing: bool,
    pub input: String,
}

impl FilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_with_context(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        ctx: &PickerContext,
    ) -> Result<()> {
        let mut content = vec![self.file_line(ctx.selected)];

        content.push(match ctx.error {
            Some(error) => Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(""),
        });

        content.push(submit_button(ctx));

        let border_color = if self.editing {
            Color::Yellow
        } else {
            Color::Blue
        };

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Resume (.pdf, .docx) ")
                .title_style(
                    Style::default()
                        .fg(border_color)
                        .add_modifier(Modifier::BOLD),
                )
                .border_style(Style::default().fg(border_color)),
        );

        frame.render_widget(paragraph, area);
        Ok(())
    }

    fn file_line(&self, selected: Option<&SelectedFile>) -> Line<'static> {
        let label = Span::styled(
            "File: ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

        if self.editing {
            return Line::from(vec![
                label,
                Span::styled(self.input.clone(), Style::default().fg(Color::White)),
                Span::styled("█", Style::default().fg(Color::Yellow)),
            ]);
        }

        match selected {
            Some(file) => Line::from(vec![
                label,
                Span::styled(file.file_name.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  [{}]", file.doc_type.label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            None => Line::from(vec![
                label,
                Span::styled(
                    "No file selected. Press o to choose a .pdf or .docx",
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
        }
    }
}

/// Submit button, dimmed whenever submitting is not allowed
fn submit_button(ctx: &PickerContext) -> Line<'static> {
    let label = if ctx.loading {
        let spinner = SPINNER[ctx.spinner_frame % SPINNER.len()];
        match ctx.elapsed_secs {
            Some(secs) => format!("  {} Analyzing... {:.0}s  ", spinner, secs),
            None => format!("  {} Analyzing...  ", spinner),
        }
    } else {
        "  Analyze Resume  ".to_string()
    };

    let style = if ctx.can_submit {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).bg(Color::Rgb(30, 30, 30))
    };

    Line::from(Span::styled(label, style)).alignment(Alignment::Center)
}

impl Component for FilePicker {
    /// Only called while editing the path
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter => {
                let path = self.input.trim();
                if path.is_empty() {
                    Some(Action::CancelPath)
                } else {
                    Some(Action::SelectFile(path.to_string()))
                }
            }
            KeyCode::Esc => Some(Action::CancelPath),
            KeyCode::Backspace => Some(Action::PathBackspace),
            KeyCode::Char(c) => Some(Action::PathInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::EditPath => self.editing = true,
            Action::PathInput(c) => self.input.push(c),
            Action::PathBackspace => {
                self.input.pop();
            }
            Action::CancelPath | Action::SelectFile(_) => self.editing = false,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs page state, see draw_with_context
        Ok(())
    }
}
