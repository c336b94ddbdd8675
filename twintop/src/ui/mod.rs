//! UI module root: screen layout and the drawing functions for each pane.

pub mod dashboard;
pub mod header;
pub mod viewport;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panes {
    pub header: Rect,
    pub banner: Rect,
    pub viewport: Rect,
    pub dashboard: Rect,
    pub status: Rect,
}

/// Root rows: header, error banner (collapsed when healthy), body, status line.
/// Body: 3D viewport on the left, dashboard on the right.
pub fn layout(area: Rect, show_banner: bool) -> Panes {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(if show_banner { 1 } else { 0 }),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
        .split(rows[2]);
    Panes {
        header: rows[0],
        banner: rows[1],
        viewport: body[0],
        dashboard: body[1],
        status: rows[3],
    }
}
