//! Data types sent to the viewer as JSON.
//! Keep this module minimal and stable; it defines the wire format.

use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct CpuInfo {
    pub percent: f32,
    // MHz
    pub frequency: u64,
    pub frequency_max: u64,
    pub cores: usize,
    // 0.0 when no sensor is available
    pub temperature: f32,
}

/// Sizes are in GiB.
#[derive(Debug, Serialize, Clone)]
pub struct MemoryInfo {
    pub percent: f64,
    pub used: f64,
    pub total: f64,
    pub available: f64,
}

/// Sizes are in GiB.
#[derive(Debug, Serialize, Clone)]
pub struct DiskInfo {
    pub percent: f64,
    pub used: f64,
    pub total: f64,
    pub free: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BatteryInfo {
    pub percent: f64,
    pub plugged: bool,
    // seconds; null while charging or when unknown
    pub time_left: Option<u64>,
}

impl BatteryInfo {
    /// What desktops (no battery) report: full and on AC.
    pub fn absent() -> Self {
        Self {
            percent: 100.0,
            plugged: true,
            time_left: None,
        }
    }
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct NetworkInfo {
    // cumulative totals across all interfaces
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

#[derive(Debug, Serialize, Clone)]
pub struct Metrics {
    pub timestamp: String,
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub disk: DiskInfo,
    pub battery: BatteryInfo,
    pub network: NetworkInfo,
    pub process_count: usize,
}

#[derive(Debug, Serialize, Clone)]
pub struct SystemInfo {
    pub cpu_count: usize,
    pub cpu_freq: u64,
    // GiB
    pub total_memory: f64,
    pub has_battery: bool,
}

#[derive(Debug, Serialize, Clone)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f64,
}
