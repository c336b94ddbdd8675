//! Rising particle cloud whose speed and color follow CPU load.

use rand::Rng;

use crate::bands::{Bands, Edge};
use crate::palette;
use crate::scene::math::Vec3;

pub const PARTICLE_COUNT: usize = 50;
pub const CEILING: f64 = 3.0;
pub const SPREAD: f64 = 2.0;
const BASE_RISE: f64 = 0.01;

pub const PARTICLE_COLORS: Bands<'static, [f32; 3]> = Bands::new(
    &[
        (Edge::Below, 30.0, palette::PARTICLE_CYAN),
        (Edge::Below, 60.0, palette::PARTICLE_YELLOW),
        (Edge::Below, 80.0, palette::PARTICLE_ORANGE),
    ],
    palette::PARTICLE_RED,
);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub color: [f32; 3],
}

#[derive(Debug, Clone)]
pub struct ParticleCloud {
    particles: Vec<Particle>,
}

fn horizontal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(-SPREAD..=SPREAD)
}

/// Per-frame rise for a CPU reading.
pub fn rise(cpu_percent: f64) -> f64 {
    BASE_RISE * (1.0 + cpu_percent.max(0.0) / 100.0)
}

impl ParticleCloud {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle {
                position: Vec3::new(horizontal(rng), rng.gen_range(0.0..CEILING), horizontal(rng)),
                color: palette::PARTICLE_CYAN,
            })
            .collect();
        Self { particles }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance one frame. Particles reaching the ceiling restart at the floor
    /// with a new horizontal position; every particle takes the band color.
    pub fn step<R: Rng + ?Sized>(&mut self, cpu_percent: f64, rng: &mut R) {
        let dy = rise(cpu_percent);
        let color = PARTICLE_COLORS.pick(cpu_percent);
        for p in &mut self.particles {
            p.position.y += dy;
            if p.position.y >= CEILING || !p.position.y.is_finite() {
                p.position = Vec3::new(horizontal(rng), 0.0, horizontal(rng));
            }
            p.color = color;
        }
    }
}
