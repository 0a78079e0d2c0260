//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Page layout areas
pub struct PageLayout {
    pub header: Rect,
    pub picker: Rect,
    pub report: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the page layout: title, picker, report, help bar
pub fn calculate_page_layout(area: Rect) -> PageLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    PageLayout {
        header: chunks[0],
        picker: chunks[1],
        report: chunks[2],
        help: chunks[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));

        let tiny = Rect::new(0, 0, 20, 5);
        let popup = centered_popup(tiny, 40, 10);
        assert_eq!(popup, Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_page_layout_gives_report_the_rest() {
        let layout = calculate_page_layout(Rect::new(0, 0, 80, 30));
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.picker.height, 5);
        assert_eq!(layout.help.height, 1);
        assert_eq!(layout.report.height, 21);
    }
}
