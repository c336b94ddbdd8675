//! Scene graph for the laptop twin: body parts, indicator panels, camera and
//! the projection into a flat draw list the terminal canvas can paint.

pub mod camera;
pub mod math;
pub mod model;

use camera::{Camera, OrbitControls, Viewport};
use math::Vec3;
use model::Part;

use crate::palette::{self, Rgb};
use crate::particles::ParticleCloud;
use crate::visuals::{IndicatorState, Reconciliation};

/// Yaw added per frame while auto-rotate is on.
pub const AUTO_ROTATE_STEP: f64 = 0.003;

#[derive(Debug, Clone)]
pub struct Indicator {
    pub part: Part,
    pub state: IndicatorState,
}

impl Indicator {
    fn at(x: f64) -> Self {
        Self {
            part: model::indicator(x),
            state: IndicatorState::default(),
        }
    }
}

/// The laptop group. Parts are placed relative to the root, which is
/// rotated about y and then offset.
#[derive(Debug, Clone)]
pub struct Laptop {
    pub rotation_y: f64,
    pub offset: Vec3,
    pub body: Vec<Part>,
    pub cpu: Indicator,
    pub memory: Indicator,
    pub battery: Indicator,
}

impl Laptop {
    fn new() -> Self {
        Self {
            rotation_y: 0.0,
            offset: Vec3::ZERO,
            body: model::body(),
            cpu: Indicator::at(-0.8),
            memory: Indicator::at(0.0),
            battery: Indicator::at(0.8),
        }
    }

    pub fn to_world(&self, p: Vec3) -> Vec3 {
        p.rotate_y(self.rotation_y) + self.offset
    }

    pub fn indicators(&self) -> [&Indicator; 3] {
        [&self.cpu, &self.memory, &self.battery]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub at: (f64, f64),
    pub color: Rgb,
}

/// One rendered frame in normalized device coordinates (`[-1, 1]` on both axes).
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub segments: Vec<Segment>,
    pub dots: Vec<Dot>,
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub controls: OrbitControls,
    pub laptop: Laptop,
    grid: Vec<(Vec3, Vec3, Rgb)>,
}

impl Scene {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            camera: Camera::new(viewport.aspect()),
            controls: OrbitControls::default(),
            laptop: Laptop::new(),
            grid: model::floor_grid(),
        }
    }

    /// Write a reconciliation into the mutable mesh state.
    pub fn apply(&mut self, r: &Reconciliation) {
        self.laptop.cpu.state = r.cpu;
        self.laptop.memory.state = r.memory;
        self.laptop.battery.state = r.battery;
        self.laptop.offset = r.root_offset;
    }

    /// Per-frame motion: auto-rotate and control damping.
    pub fn advance(&mut self, auto_rotate: bool) {
        if auto_rotate {
            self.laptop.rotation_y += AUTO_ROTATE_STEP;
        }
        self.controls.update(&mut self.camera);
    }

    pub fn reset_camera(&mut self) {
        self.controls.reset(&mut self.camera);
    }

    /// Keep the camera projection matched to the drawing area.
    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.set_viewport(viewport);
    }

    pub fn render(&self, particles: &ParticleCloud) -> DrawList {
        let camera = &self.camera;
        let mut out = DrawList::default();
        for &(a, b, color) in &self.grid {
            push_segment(&mut out, camera, a, b, color);
        }
        for part in &self.laptop.body {
            for (a, b) in part.segments(1.0) {
                let (a, b) = (self.laptop.to_world(a), self.laptop.to_world(b));
                push_segment(&mut out, camera, a, b, part.color);
            }
        }
        for ind in self.laptop.indicators() {
            let color = ind.state.color.over(palette::BACKGROUND, ind.state.opacity);
            for (a, b) in ind.part.segments(ind.state.scale) {
                let (a, b) = (self.laptop.to_world(a), self.laptop.to_world(b));
                push_segment(&mut out, camera, a, b, color);
            }
        }
        for p in particles.particles() {
            if let Some(pr) = camera.project(p.position) {
                let color = Rgb::unit(p.color).over(palette::BACKGROUND, palette::PARTICLE_OPACITY);
                out.dots.push(Dot {
                    at: (pr.x, pr.y),
                    color: palette::fogged(color, pr.depth),
                });
            }
        }
        out
    }
}

fn push_segment(out: &mut DrawList, camera: &Camera, a: Vec3, b: Vec3, color: Rgb) {
    if let Some((pa, pb)) = camera.project_segment(a, b) {
        let depth = (pa.depth + pb.depth) / 2.0;
        out.segments.push(Segment {
            from: (pa.x, pa.y),
            to: (pb.x, pb.y),
            color: palette::fogged(color, depth),
        });
    }
}
