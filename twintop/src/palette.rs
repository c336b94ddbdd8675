//! Shared colors: indicator hues, particle colors, scene and fog.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(v: u32) -> Self {
        Rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// From unit floats in `[0, 1]`.
    pub fn unit(c: [f32; 3]) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb(q(c[0]), q(c[1]), q(c[2]))
    }

    /// Linear mix: `t = 0` is `self`, `t = 1` is `other`.
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let m = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(m(self.0, other.0), m(self.1, other.1), m(self.2, other.2))
    }

    /// This color drawn at `opacity` over `background`.
    pub fn over(self, background: Rgb, opacity: f64) -> Rgb {
        background.mix(self, opacity)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.0, c.1, c.2)
    }
}

// Status colors (memory / battery / dashboard bars)
pub const NORMAL: Rgb = Rgb::hex(0x00ff88);
pub const WARNING: Rgb = Rgb::hex(0xffaa00);
pub const DANGER: Rgb = Rgb::hex(0xff4444);

// CPU temperature-style hues
pub const CPU_COOL: Rgb = Rgb::hex(0x00ffff);
pub const CPU_WARM: Rgb = Rgb::hex(0xffff00);
pub const CPU_HOT: Rgb = Rgb::hex(0xff6600);
pub const CPU_CRITICAL: Rgb = Rgb::hex(0xff0000);

// Particle colors (unit RGB)
pub const PARTICLE_CYAN: [f32; 3] = [0.0, 1.0, 1.0];
pub const PARTICLE_YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
pub const PARTICLE_ORANGE: [f32; 3] = [1.0, 0.5, 0.0];
pub const PARTICLE_RED: [f32; 3] = [1.0, 0.0, 0.0];
pub const PARTICLE_OPACITY: f64 = 0.6;

// Scene
pub const BACKGROUND: Rgb = Rgb::hex(0x1a1a2e);
pub const FOG_NEAR: f64 = 5.0;
pub const FOG_FAR: f64 = 20.0;
pub const GRID_CENTER: Rgb = Rgb::hex(0x444466);
pub const GRID_LINE: Rgb = Rgb::hex(0x333344);

pub const BASE: Rgb = Rgb::hex(0xc0c0c0);
pub const KEYBOARD: Rgb = Rgb::hex(0x333333);
pub const BEZEL: Rgb = Rgb::hex(0xb8b8b8);
pub const SCREEN: Rgb = Rgb::hex(0x0055ff);
pub const HINGE: Rgb = Rgb::hex(0xa8a8a8);

/// Linear fog toward the background color by camera depth.
pub fn fogged(c: Rgb, depth: f64) -> Rgb {
    let t = (depth - FOG_NEAR) / (FOG_FAR - FOG_NEAR);
    c.mix(BACKGROUND, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_unit_agree() {
        assert_eq!(Rgb::hex(0xff8000), Rgb(255, 128, 0));
        assert_eq!(Rgb::unit(PARTICLE_ORANGE), Rgb(255, 128, 0));
    }

    #[test]
    fn opacity_blends_over_background() {
        assert_eq!(CPU_CRITICAL.over(BACKGROUND, 1.0), CPU_CRITICAL);
        assert_eq!(CPU_CRITICAL.over(BACKGROUND, 0.0), BACKGROUND);
        assert_eq!(fogged(NORMAL, 1.0), NORMAL);
        assert_eq!(fogged(NORMAL, 50.0), BACKGROUND);
    }
}
