//! Laptop geometry as wireframe parts, plus the floor grid.

use super::math::Vec3;
use crate::palette::{self, Rgb};

// Screen tilt away from the viewer
pub const SCREEN_TILT: f64 = -0.25;
pub const INDICATOR_SIZE: f64 = 0.5;
const INDICATOR_Y: f64 = 1.4;
const INDICATOR_Z: f64 = -0.88;
// Interior lines so a panel reads as filled
const PANEL_HATCH: usize = 4;

const GRID_SIZE: f64 = 20.0;
const GRID_DIVISIONS: usize = 20;
const GRID_Y: f64 = -0.09;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cuboid { size: Vec3 },
    Panel { width: f64, height: f64 },
}

/// One rigid part in laptop-root space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Part {
    pub shape: Shape,
    pub center: Vec3,
    pub tilt_x: f64,
    pub color: Rgb,
}

impl Part {
    const fn cuboid(size: Vec3, center: Vec3, tilt_x: f64, color: Rgb) -> Self {
        Self { shape: Shape::Cuboid { size }, center, tilt_x, color }
    }

    const fn panel(width: f64, height: f64, center: Vec3, tilt_x: f64, color: Rgb) -> Self {
        Self { shape: Shape::Panel { width, height }, center, tilt_x, color }
    }

    fn place(&self, local: Vec3) -> Vec3 {
        local.rotate_x(self.tilt_x) + self.center
    }

    /// Edges in laptop-root space. `scale` grows a panel about its center in
    /// its own plane (the indicator pulse); cuboids ignore it.
    pub fn segments(&self, scale: f64) -> Vec<(Vec3, Vec3)> {
        match self.shape {
            Shape::Cuboid { size } => {
                let h = size * 0.5;
                let sign = |i: usize, bit: usize| if i & bit == 0 { -1.0 } else { 1.0 };
                let corner = |i: usize| {
                    Vec3::new(sign(i, 1) * h.x, sign(i, 2) * h.y, sign(i, 4) * h.z)
                };
                // corners differing in exactly one bit share an edge
                let mut out = Vec::with_capacity(12);
                for a in 0..8usize {
                    for bit in [1usize, 2, 4] {
                        let b = a | bit;
                        if b != a {
                            out.push((self.place(corner(a)), self.place(corner(b))));
                        }
                    }
                }
                out
            }
            Shape::Panel { width, height } => {
                let hw = width * 0.5 * scale;
                let hh = height * 0.5 * scale;
                let mut out = Vec::with_capacity(4 + PANEL_HATCH);
                let c = [
                    Vec3::new(-hw, -hh, 0.0),
                    Vec3::new(hw, -hh, 0.0),
                    Vec3::new(hw, hh, 0.0),
                    Vec3::new(-hw, hh, 0.0),
                ];
                for i in 0..4 {
                    out.push((self.place(c[i]), self.place(c[(i + 1) % 4])));
                }
                for k in 1..=PANEL_HATCH {
                    let y = -hh + 2.0 * hh * k as f64 / (PANEL_HATCH + 1) as f64;
                    out.push((self.place(Vec3::new(-hw, y, 0.0)), self.place(Vec3::new(hw, y, 0.0))));
                }
                out
            }
        }
    }
}

/// Static body parts: base, keyboard, bezel, screen, hinge.
pub fn body() -> Vec<Part> {
    vec![
        Part::cuboid(Vec3::new(3.0, 0.15, 2.0), Vec3::ZERO, 0.0, palette::BASE),
        Part::cuboid(Vec3::new(2.8, 0.01, 1.8), Vec3::new(0.0, 0.08, 0.0), 0.0, palette::KEYBOARD),
        Part::cuboid(Vec3::new(3.0, 2.0, 0.1), Vec3::new(0.0, 1.1, -0.95), SCREEN_TILT, palette::BEZEL),
        Part::panel(2.7, 1.7, Vec3::new(0.0, 1.1, -0.89), SCREEN_TILT, palette::SCREEN),
        Part::cuboid(Vec3::new(3.0, 0.1, 0.1), Vec3::new(0.0, 0.1, -1.0), 0.0, palette::HINGE),
    ]
}

/// Indicator panel at horizontal position `x` on the screen.
pub fn indicator(x: f64) -> Part {
    Part::panel(
        INDICATOR_SIZE,
        INDICATOR_SIZE,
        Vec3::new(x, INDICATOR_Y, INDICATOR_Z),
        SCREEN_TILT,
        palette::NORMAL,
    )
}

/// Floor grid lines in world space with their colors.
pub fn floor_grid() -> Vec<(Vec3, Vec3, Rgb)> {
    let half = GRID_SIZE / 2.0;
    let step = GRID_SIZE / GRID_DIVISIONS as f64;
    (0..=GRID_DIVISIONS)
        .flat_map(|i| {
            let t = -half + step * i as f64;
            let color = if i == GRID_DIVISIONS / 2 {
                palette::GRID_CENTER
            } else {
                palette::GRID_LINE
            };
            [
                (Vec3::new(-half, GRID_Y, t), Vec3::new(half, GRID_Y, t), color),
                (Vec3::new(t, GRID_Y, -half), Vec3::new(t, GRID_Y, half), color),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_twelve_edges_panel_has_outline_and_hatch() {
        let body = body();
        assert_eq!(body[0].segments(1.0).len(), 12);
        assert_eq!(indicator(0.0).segments(1.0).len(), 4 + PANEL_HATCH);
        assert_eq!(floor_grid().len(), 2 * (GRID_DIVISIONS + 1));
    }

    #[test]
    fn panel_scale_grows_about_center() {
        let p = indicator(0.8);
        let width = |scale: f64| {
            let (a, b) = p.segments(scale)[0];
            (b - a).length()
        };
        assert!((width(1.0) - INDICATOR_SIZE).abs() < 1e-9);
        assert!((width(1.2) - INDICATOR_SIZE * 1.2).abs() < 1e-9);
    }
}
