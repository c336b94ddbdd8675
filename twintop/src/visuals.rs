//! Metric-to-visual mapping: indicator color, opacity and pulse, plus the
//! whole-model vibration under heavy CPU load.
//!
//! Everything here is pure; [`crate::scene::Scene::apply`] writes the result
//! into the scene.

use crate::bands::{Bands, Edge};
use crate::palette::{self, Rgb};
use crate::scene::math::Vec3;
use crate::types::MetricsSnapshot;

pub const CPU_COLORS: Bands<'static, Rgb> = Bands::new(
    &[
        (Edge::Below, 30.0, palette::CPU_COOL),
        (Edge::Below, 60.0, palette::CPU_WARM),
        (Edge::Below, 80.0, palette::CPU_HOT),
    ],
    palette::CPU_CRITICAL,
);

pub const MEMORY_COLORS: Bands<'static, Rgb> = Bands::new(
    &[
        (Edge::Above, 80.0, palette::DANGER),
        (Edge::Above, 60.0, palette::WARNING),
    ],
    palette::NORMAL,
);

pub const BATTERY_COLORS: Bands<'static, Rgb> = Bands::new(
    &[
        (Edge::Below, 20.0, palette::DANGER),
        (Edge::Below, 50.0, palette::WARNING),
    ],
    palette::NORMAL,
);

const PULSE_FREQ: f64 = 0.001;
const PULSE_AMPLITUDE: f64 = 0.1;
const CPU_PHASE: f64 = 0.0;
const MEMORY_PHASE: f64 = 1.0;
const CHARGE_FREQ: f64 = 0.002;
const CHARGE_AMPLITUDE: f64 = 0.2;

pub const VIBRATION_THRESHOLD: f64 = 80.0;
const VIBRATION_FREQ_X: f64 = 0.01;
const VIBRATION_FREQ_Y: f64 = 0.015;
const VIBRATION_AMPLITUDE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorState {
    pub color: Rgb,
    pub opacity: f64,
    pub scale: f64,
}

impl Default for IndicatorState {
    fn default() -> Self {
        Self {
            color: palette::NORMAL,
            opacity: 0.8,
            scale: 1.0,
        }
    }
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciliation {
    pub cpu: IndicatorState,
    pub memory: IndicatorState,
    pub battery: IndicatorState,
    /// Laptop root offset; exactly zero unless CPU is above the threshold.
    pub root_offset: Vec3,
}

/// `[0, 100]` maps linearly onto `[0.5, 1.0]`.
pub fn opacity(value: f64) -> f64 {
    0.5 + value / 200.0
}

/// Load-scaled pulse used by the CPU and memory panels.
pub fn pulse(elapsed_ms: f64, phase: f64, value: f64) -> f64 {
    1.0 + (elapsed_ms * PULSE_FREQ + phase).sin() * PULSE_AMPLITUDE * (value / 100.0)
}

/// Fixed-amplitude pulse while charging; a still panel otherwise.
pub fn charge_pulse(elapsed_ms: f64, plugged: bool) -> f64 {
    if plugged {
        1.0 + (elapsed_ms * CHARGE_FREQ).sin() * CHARGE_AMPLITUDE
    } else {
        1.0
    }
}

pub fn vibration(cpu_percent: f64, elapsed_ms: f64) -> Vec3 {
    if cpu_percent > VIBRATION_THRESHOLD {
        Vec3::new(
            (elapsed_ms * VIBRATION_FREQ_X).sin() * VIBRATION_AMPLITUDE,
            (elapsed_ms * VIBRATION_FREQ_Y).sin() * VIBRATION_AMPLITUDE,
            0.0,
        )
    } else {
        Vec3::ZERO
    }
}

pub fn reconcile(s: &MetricsSnapshot, elapsed_ms: f64) -> Reconciliation {
    Reconciliation {
        cpu: IndicatorState {
            color: CPU_COLORS.pick(s.cpu_percent),
            opacity: opacity(s.cpu_percent),
            scale: pulse(elapsed_ms, CPU_PHASE, s.cpu_percent),
        },
        memory: IndicatorState {
            color: MEMORY_COLORS.pick(s.memory_percent),
            opacity: opacity(s.memory_percent),
            scale: pulse(elapsed_ms, MEMORY_PHASE, s.memory_percent),
        },
        battery: IndicatorState {
            color: BATTERY_COLORS.pick(s.battery_percent),
            opacity: opacity(s.battery_percent),
            scale: charge_pulse(elapsed_ms, s.battery_plugged),
        },
        root_offset: vibration(s.cpu_percent, elapsed_ms),
    }
}
