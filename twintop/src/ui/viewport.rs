//! Braille canvas that paints a projected scene frame.

use ratatui::{
    layout::Rect,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders,
    },
};

use crate::palette;
use crate::scene::{camera::Viewport, DrawList};

// Braille cells are 2x4 dots; terminal cells are about twice as tall as wide,
// which makes dots roughly square.
const DOTS_X: f64 = 2.0;
const DOTS_Y: f64 = 4.0;

fn block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title("Digital twin")
}

/// Drawing surface size for a pane, in square units.
pub fn viewport_for(area: Rect) -> Viewport {
    let inner = block().inner(area);
    Viewport::new(inner.width as f64 * DOTS_X, inner.height as f64 * DOTS_Y)
}

pub fn draw_viewport(f: &mut ratatui::Frame<'_>, area: Rect, frame: &DrawList) {
    let canvas = Canvas::default()
        .block(block())
        .marker(Marker::Braille)
        .background_color(palette::BACKGROUND.into())
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for s in &frame.segments {
                ctx.draw(&CanvasLine::new(
                    s.from.0,
                    s.from.1,
                    s.to.0,
                    s.to.1,
                    s.color.into(),
                ));
            }
            for d in &frame.dots {
                ctx.draw(&Points {
                    coords: &[d.at],
                    color: d.color.into(),
                });
            }
        });
    f.render_widget(canvas, area);
}
