//! Analysis report view
//!
//! Pure rendering of a received report: summary, ATS score gauge, skill and
//! industry badges, and severity-tagged recommendations. Draws nothing unless
//! the submission succeeded.

use crate::action::Action;
use crate::component::Component;
use crate::model::{AnalysisReport, Recommendation, SubmissionState};
use anyhow::Result;
use chrono::{DateTime, Local};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const SKILL_BADGE: (Color, Color) = (Color::Rgb(30, 64, 175), Color::Rgb(219, 234, 254));
const INDUSTRY_BADGE: (Color, Color) = (Color::Rgb(107, 33, 168), Color::Rgb(243, 232, 255));
const EXAMPLE_BG: Color = Color::Rgb(45, 45, 50);
const MAX_GAUGE_WIDTH: usize = 50;

/// Scrollable report panel
#[derive(Default)]
pub struct ReportView {
    pub scroll_offset: usize,
}

impl ReportView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn draw_with_state(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &SubmissionState,
        completed_at: Option<DateTime<Local>>,
    ) -> Result<()> {
        let Some(report) = state.report() else {
            return Ok(());
        };

        // Borders plus one column for the scrollbar
        let text_width = area.width.saturating_sub(3) as usize;
        let lines = report_lines(report, text_width);

        let total = lines.len();
        let visible_height = area.height.saturating_sub(2) as usize;
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let title = match completed_at {
            Some(at) => format!(" Analysis Report · {} ", at.format("%H:%M:%S")),
            None => " Analysis Report ".to_string(),
        };

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

impl Component for ReportView {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollUp => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            Action::ScrollDown => self.scroll_offset = self.scroll_offset.saturating_add(1),
            Action::PageUp => self.scroll_offset = self.scroll_offset.saturating_sub(10),
            Action::PageDown => self.scroll_offset = self.scroll_offset.saturating_add(10),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the submission state, see draw_with_state
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Report content
// ─────────────────────────────────────────────────────────────────────────────

/// Build every section of the report, wrapped to `width` columns
pub fn report_lines(report: &AnalysisReport, width: usize) -> Vec<Line<'static>> {
    let width = width.max(10);
    let mut lines = Vec::new();

    section_header(&mut lines, "Analysis Summary");
    for chunk in wrap_text(&report.summary, width) {
        lines.push(Line::from(Span::styled(chunk, Style::default().fg(Color::Gray))));
    }

    section_header(&mut lines, "ATS Score");
    lines.extend(score_lines(report.ats_score, width));

    section_header(&mut lines, "Identified Skills");
    lines.extend(badge_lines(&report.skills, SKILL_BADGE, width));

    section_header(&mut lines, "Industry Focus");
    lines.extend(badge_lines(&report.industry_focus, INDUSTRY_BADGE, width));

    section_header(&mut lines, "Recommendations");
    for (i, rec) in report.recommendations.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.extend(recommendation_lines(rec, width));
    }

    lines
}

fn section_header(lines: &mut Vec<Line<'static>>, title: &str) {
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "─".repeat(title.width()),
        Style::default().fg(Color::DarkGray),
    )));
}

/// Gauge bar filled to the score, then the band message
pub fn score_lines(score: i64, width: usize) -> Vec<Line<'static>> {
    let band = crate::model::ScoreBand::from_score(score);
    let color = band.color();

    let label = format!(" {}/100", score);
    let bar_width = width.saturating_sub(label.width()).clamp(10, MAX_GAUGE_WIDTH);
    let filled = (score.clamp(0, 100) as usize * bar_width + 50) / 100;

    let gauge = Line::from(vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(bar_width - filled),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]);

    let mut lines = vec![gauge];
    for chunk in wrap_text(band.message(), width) {
        lines.push(Line::from(Span::styled(chunk, Style::default().fg(Color::Gray))));
    }
    lines
}

/// One badge per item, flowing onto new lines when `width` is reached
pub fn badge_lines(items: &[String], (fg, bg): (Color, Color), width: usize) -> Vec<Line<'static>> {
    let badge_style = Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for item in items {
        let badge = format!(" {} ", item);
        let badge_width = badge.width();
        let gap = if current.is_empty() { 0 } else { 1 };

        if !current.is_empty() && used + gap + badge_width > width {
            lines.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        } else if gap > 0 {
            current.push(Span::raw(" "));
            used += gap;
        }

        current.push(Span::styled(badge, badge_style));
        used += badge_width;
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

/// Dot and message always; suggestion and example only when present
pub fn recommendation_lines(rec: &Recommendation, width: usize) -> Vec<Line<'static>> {
    let indent = "  ";
    let body_width = width.saturating_sub(indent.len());
    let mut lines = Vec::new();

    for (i, chunk) in wrap_text(&rec.message, body_width).into_iter().enumerate() {
        let lead = if i == 0 {
            Span::styled("● ", Style::default().fg(rec.severity.color()))
        } else {
            Span::raw(indent)
        };
        lines.push(Line::from(vec![
            lead,
            Span::styled(
                chunk,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    if let Some(suggestion) = rec.suggestion.as_deref().filter(|s| !s.trim().is_empty()) {
        for chunk in wrap_text(suggestion, body_width) {
            lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(chunk, Style::default().fg(Color::Gray)),
            ]));
        }
    }

    if let Some(example) = rec.example.as_deref().filter(|s| !s.trim().is_empty()) {
        let example_style = Style::default().fg(Color::Gray).bg(EXAMPLE_BG);
        lines.push(Line::from(vec![
            Span::raw(indent),
            Span::styled("Example:", example_style.add_modifier(Modifier::BOLD)),
        ]));
        for chunk in wrap_text(example, body_width) {
            lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(chunk, example_style),
            ]));
        }
    }

    lines
}

/// Word-wrap `text` to `width` display columns
///
/// Embedded newlines start a new line; words wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.width()
            } else {
                line.width() + 1 + word.width()
            };

            if needed <= width {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                continue;
            }

            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
            }

            // Hard-split anything that still does not fit
            for ch in word.chars() {
                let ch_width = ch.to_string().width();
                if line.width() + ch_width > width && !line.is_empty() {
                    out.push(std::mem::take(&mut line));
                }
                line.push(ch);
            }
        }
        out.push(line);
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ScoreBand, Severity};
    use crate::services::fake::sample_report;
    use ratatui::{backend::TestBackend, Terminal};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn rec(message: &str, severity: Severity) -> Recommendation {
        Recommendation {
            message: message.to_string(),
            suggestion: None,
            example: None,
            severity,
        }
    }

    #[test]
    fn test_report_sections_in_order() {
        let lines: Vec<String> = report_lines(&sample_report(), 60).iter().map(text).collect();

        let pos = |needle: &str| {
            lines
                .iter()
                .position(|l| l == needle)
                .unwrap_or_else(|| panic!("missing line {needle:?} in {lines:#?}"))
        };

        let summary = pos("Analysis Summary");
        let score = pos("ATS Score");
        let skills = pos("Identified Skills");
        let industry = pos("Industry Focus");
        let recs = pos("Recommendations");
        assert!(summary < score && score < skills && skills < industry && industry < recs);

        assert_eq!(lines[summary + 2], "Good");
        assert_eq!(lines[skills + 2], " Python ");
        assert_eq!(lines[industry + 2], " Tech ");
        // Empty recommendations: header and underline only
        assert_eq!(lines.len(), recs + 2);
    }

    #[test]
    fn test_empty_skills_section_is_still_present() {
        let mut report = sample_report();
        report.skills.clear();
        let lines: Vec<String> = report_lines(&report, 60).iter().map(text).collect();

        let skills = lines.iter().position(|l| l == "Identified Skills").unwrap();
        assert_eq!(lines[skills + 2], "");
        assert_eq!(lines[skills + 3], "Industry Focus");
    }

    #[test]
    fn test_score_gauge_uses_band_color() {
        let lines = score_lines(85, 60);
        let gauge = &lines[0];

        assert!(text(gauge).ends_with(" 85/100"));
        assert_eq!(gauge.spans[0].style.fg, Some(ScoreBand::Positive.color()));
        assert_eq!(
            text(&lines[1]),
            "Great job! Your resume is well-optimized for ATS systems."
        );

        let lines = score_lines(40, 80);
        assert_eq!(lines[0].spans[2].style.fg, Some(ScoreBand::Warning.color()));
        assert!(text(&lines[1]).starts_with("Your resume needs some improvements"));

        let lines = score_lines(39, 80);
        assert_eq!(lines[0].spans[2].style.fg, Some(ScoreBand::Critical.color()));
        assert!(text(&lines[1]).contains("significant improvements"));
    }

    #[test]
    fn test_score_gauge_fill_is_clamped() {
        let full = score_lines(150, 40);
        assert!(full[0].spans[1].content.is_empty());

        let empty = score_lines(-20, 40);
        assert!(empty[0].spans[0].content.is_empty());
        assert!(text(&empty[0]).ends_with(" -20/100"));
    }

    #[test]
    fn test_badges_wrap_and_keep_order() {
        let items: Vec<String> = ["Rust", "Python", "Kubernetes", "SQL"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let lines = badge_lines(&items, SKILL_BADGE, 20);
        let rendered: Vec<String> = lines.iter().map(text).collect();

        assert_eq!(rendered, vec![" Rust   Python ", " Kubernetes   SQL "]);
        assert!(badge_lines(&[], SKILL_BADGE, 20).is_empty());
    }

    #[test]
    fn test_bare_recommendation_renders_message_and_dot_only() {
        let lines = recommendation_lines(&rec("Add a skills section", Severity::Unknown), 60);

        assert_eq!(lines.len(), 1);
        assert_eq!(text(&lines[0]), "● Add a skills section");
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Gray));
    }

    #[test]
    fn test_recommendation_optional_parts() {
        let mut full = rec("Quantify results", Severity::High);
        full.suggestion = Some("Use numbers".to_string());
        full.example = Some("Cut costs by 20%".to_string());

        let rendered: Vec<String> = recommendation_lines(&full, 60).iter().map(text).collect();
        assert_eq!(
            rendered,
            vec![
                "● Quantify results",
                "  Use numbers",
                "  Example:",
                "  Cut costs by 20%"
            ]
        );

        let mut example_only = rec("Fix dates", Severity::Low);
        example_only.example = Some("2019 - 2021".to_string());
        let lines = recommendation_lines(&example_only, 60);
        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[1]), "  Example:");
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Green));

        let mut blank = rec("Shorten", Severity::Medium);
        blank.suggestion = Some(String::new());
        blank.example = Some("   ".to_string());
        let rendered: Vec<String> = recommendation_lines(&blank, 60).iter().map(text).collect();
        assert_eq!(rendered, vec!["● Shorten"]);
    }

    #[test]
    fn test_recommendations_keep_source_order() {
        let mut report = sample_report();
        report.recommendations = vec![
            rec("first", Severity::Low),
            rec("second", Severity::High),
            rec("third", Severity::Medium),
        ];
        let lines = report_lines(&report, 60);
        let dots: Vec<(String, Option<Color>)> = lines
            .iter()
            .filter(|l| l.spans.first().map(|s| s.content == "● ").unwrap_or(false))
            .map(|l| (text(l), l.spans[0].style.fg))
            .collect();

        assert_eq!(
            dots,
            vec![
                ("● first".to_string(), Some(Color::Green)),
                ("● second".to_string(), Some(Color::Red)),
                ("● third".to_string(), Some(Color::Yellow)),
            ]
        );
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("first\nsecond", 40), vec!["first", "second"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_draws_nothing_without_report() {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut view = ReportView::new();

        for state in [
            SubmissionState::Idle,
            SubmissionState::Loading,
            SubmissionState::Failed("Failed to analyze resume".to_string()),
        ] {
            terminal
                .draw(|frame| {
                    view.draw_with_state(frame, frame.area(), &state, None).unwrap();
                })
                .unwrap();
            let buffer = terminal.backend().buffer();
            assert!(buffer.content.iter().all(|cell| cell.symbol() == " "));
        }
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut view = ReportView::new();
        view.scroll_offset = 500;
        let state = SubmissionState::Succeeded(sample_report());

        terminal
            .draw(|frame| {
                view.draw_with_state(frame, frame.area(), &state, None).unwrap();
            })
            .unwrap();

        let total = report_lines(&sample_report(), 57).len();
        assert_eq!(view.scroll_offset, total - 6);
    }
}
