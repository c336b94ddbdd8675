//! Types that mirror the agent's JSON schema, and the validated snapshot built from them.

use serde::Deserialize;

use crate::error::FetchError;

#[derive(Debug, Deserialize, Clone)]
pub struct Percent {
    pub percent: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Battery {
    pub percent: f64,
    pub plugged: bool,
}

/// The subset of `/api/metrics` the viewer reads; other fields are ignored.
#[derive(Debug, Deserialize, Clone)]
pub struct Metrics {
    pub cpu: Percent,
    pub memory: Percent,
    pub battery: Battery,
    pub disk: Percent,
    pub process_count: u64,
}

/// One poll result. Percentages are finite and clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub battery_percent: f64,
    pub battery_plugged: bool,
    pub disk_percent: f64,
    pub process_count: u64,
}

fn checked(field: &'static str, v: f64) -> Result<f64, FetchError> {
    if v.is_finite() {
        Ok(v.clamp(0.0, 100.0))
    } else {
        Err(FetchError::NonFinite { field })
    }
}

impl TryFrom<Metrics> for MetricsSnapshot {
    type Error = FetchError;

    fn try_from(m: Metrics) -> Result<Self, Self::Error> {
        Ok(Self {
            cpu_percent: checked("cpu.percent", m.cpu.percent)?,
            memory_percent: checked("memory.percent", m.memory.percent)?,
            battery_percent: checked("battery.percent", m.battery.percent)?,
            battery_plugged: m.battery.plugged,
            disk_percent: checked("disk.percent", m.disk.percent)?,
            process_count: m.process_count,
        })
    }
}

impl MetricsSnapshot {
    /// Parse and validate an `/api/metrics` body.
    pub fn from_json(body: &[u8]) -> Result<Self, FetchError> {
        let m: Metrics = serde_json::from_slice(body)?;
        m.try_into()
    }
}
