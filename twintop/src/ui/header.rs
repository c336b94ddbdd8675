//! Top header, error banner and the bottom key-help status line.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, url: &str, connected: bool) {
    let state = if connected { "live" } else { "connecting..." };
    let title = format!("twintop — agent: {url} | {state}  (press 'q' to quit)");
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}

/// Shown while the last poll failed; cleared by the next success.
pub fn draw_error_banner(f: &mut ratatui::Frame<'_>, area: Rect) {
    let line = Line::from(Span::styled(
        " ⚠ Cannot reach the metrics agent. Retrying every poll; showing last known values.",
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(line).style(Style::default().bg(Color::Red)), area);
}

pub fn draw_status(f: &mut ratatui::Frame<'_>, area: Rect, animating: bool, auto_rotate: bool) {
    let on_off = |b: bool| if b { "on" } else { "off" };
    let text = format!(
        " animation: {} | auto-rotate: {} | arrows orbit  +/- zoom  r reset view  space animation  a auto-rotate",
        on_off(animating),
        on_off(auto_rotate)
    );
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
