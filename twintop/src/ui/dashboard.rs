//! Dashboard gauges: CPU, memory, battery and disk bars plus the process count.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::bands::{Bands, Edge};
use crate::palette::{self, Rgb};
use crate::types::MetricsSnapshot;

// CPU and memory bars turn warning/danger under load; battery and disk stay plain.
const LOAD_BAR: Bands<'static, Rgb> = Bands::new(
    &[
        (Edge::Above, 80.0, palette::DANGER),
        (Edge::Above, 60.0, palette::WARNING),
    ],
    palette::NORMAL,
);
const PLAIN_BAR: Rgb = palette::NORMAL;

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeRow {
    pub title: &'static str,
    pub label: String,
    pub percent: u16,
    pub color: Rgb,
}

// Bar width follows the displayed (rounded) text.
fn bar(label_value: &str) -> u16 {
    label_value
        .parse::<f64>()
        .map(|v| v.clamp(0.0, 100.0).round() as u16)
        .unwrap_or(0)
}

pub fn gauge_rows(s: &MetricsSnapshot) -> [GaugeRow; 4] {
    let cpu = format!("{:.1}", s.cpu_percent);
    let mem = format!("{:.1}", s.memory_percent);
    let battery = format!("{:.0}", s.battery_percent);
    let disk = format!("{:.1}", s.disk_percent);
    [
        GaugeRow {
            title: "CPU",
            percent: bar(&cpu),
            label: format!("{cpu}%"),
            color: LOAD_BAR.pick(s.cpu_percent),
        },
        GaugeRow {
            title: "Memory",
            percent: bar(&mem),
            label: format!("{mem}%"),
            color: LOAD_BAR.pick(s.memory_percent),
        },
        GaugeRow {
            title: "Battery",
            percent: bar(&battery),
            label: if s.battery_plugged {
                format!("{battery}% ⚡")
            } else {
                format!("{battery}%")
            },
            color: PLAIN_BAR,
        },
        GaugeRow {
            title: "Disk",
            percent: bar(&disk),
            label: format!("{disk}%"),
            color: PLAIN_BAR,
        },
    ]
}

pub fn draw_dashboard(f: &mut ratatui::Frame<'_>, area: Rect, s: Option<&MetricsSnapshot>) {
    let block = Block::default().borders(Borders::ALL).title("System");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(s) = s else {
        f.render_widget(Paragraph::new("waiting for first metrics..."), inner);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    for (row, slot) in gauge_rows(s).into_iter().zip(rows.iter()) {
        let g = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(row.title))
            .gauge_style(Style::default().fg(row.color.into()))
            .percent(row.percent)
            .label(row.label);
        f.render_widget(g, *slot);
    }

    let procs = Line::from(vec![
        Span::raw(" Processes: "),
        Span::styled(
            s.process_count.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(procs), rows[4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_bar_colors() {
        let s = MetricsSnapshot {
            cpu_percent: 61.26,
            memory_percent: 80.04,
            battery_percent: 49.6,
            battery_plugged: true,
            disk_percent: 12.0,
            process_count: 321,
        };
        let rows = gauge_rows(&s);
        assert_eq!(rows[0].label, "61.3%");
        assert_eq!(rows[0].percent, 61);
        assert_eq!(rows[0].color, palette::WARNING);
        assert_eq!(rows[1].color, palette::DANGER);
        assert_eq!(rows[2].label, "50% ⚡");
        assert_eq!(rows[2].percent, 50);
        assert_eq!(rows[3].label, "12.0%");
    }
}
