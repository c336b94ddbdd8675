//! Metrics collection using sysinfo for twintop_agent.

use crate::battery::collect_battery;
use crate::state::AppState;
use crate::types::{
    BatteryInfo, CpuInfo, DiskInfo, MemoryInfo, Metrics, NetworkInfo, ProcessInfo, SystemInfo,
};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::time::Duration;
use sysinfo::{Disks, ProcessRefreshKind, ProcessesToUpdate};
use tracing::warn;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

// How many processes /api/processes/top returns
pub const TOP_PROCESSES: usize = 10;
// Window between the two process samples
const PROCESS_SAMPLE_WINDOW: Duration = Duration::from_millis(100);

// Runtime toggle (read once)
fn temp_enabled() -> bool {
    static ON: OnceCell<bool> = OnceCell::new();
    *ON.get_or_init(|| {
        std::env::var("TWINTOP_AGENT_TEMP")
            .map(|v| v != "0")
            .unwrap_or(true)
    })
}

fn gib(bytes: u64) -> f64 {
    bytes as f64 / GIB
}

pub fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

pub async fn collect_metrics(state: &AppState) -> Metrics {
    let mut sys = state.sys.lock().await;
    if let Err(e) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );
    })) {
        warn!("sysinfo refresh panicked: {e:?}");
    }

    let frequency = sys.cpus().first().map(|c| c.frequency()).unwrap_or(0);
    let frequency_max = sys.cpus().iter().map(|c| c.frequency()).max().unwrap_or(0);
    let cores = sys.cpus().len();
    let cpu_percent = sys.global_cpu_usage().clamp(0.0, 100.0);

    let mem_total = sys.total_memory();
    let mem_available = sys.available_memory();
    let mem_used = mem_total.saturating_sub(mem_available);
    let process_count = sys.processes().len();
    drop(sys);

    let temperature = if temp_enabled() {
        let mut components = state.components.lock().await;
        components.refresh(false);
        best_cpu_temp(&components).unwrap_or(0.0)
    } else {
        0.0
    };

    let disk = {
        let mut disks = state.disks.lock().await;
        disks.refresh(true);
        root_disk(&disks)
    };

    let network = {
        let mut nets = state.networks.lock().await;
        nets.refresh(true);
        nets.iter().fold(NetworkInfo::default(), |mut acc, (_, data)| {
            acc.bytes_sent = acc.bytes_sent.saturating_add(data.total_transmitted());
            acc.bytes_recv = acc.bytes_recv.saturating_add(data.total_received());
            acc.packets_sent = acc
                .packets_sent
                .saturating_add(data.total_packets_transmitted());
            acc.packets_recv = acc
                .packets_recv
                .saturating_add(data.total_packets_received());
            acc
        })
    };

    let battery =
        collect_battery(&state.power_supply_root).unwrap_or_else(BatteryInfo::absent);

    Metrics {
        timestamp: chrono::Local::now().to_rfc3339(),
        cpu: CpuInfo {
            percent: cpu_percent,
            frequency,
            frequency_max,
            cores,
            temperature,
        },
        memory: MemoryInfo {
            percent: percent_of(mem_used, mem_total),
            used: gib(mem_used),
            total: gib(mem_total),
            available: gib(mem_available),
        },
        disk,
        battery,
        network,
        process_count,
    }
}

pub async fn collect_system_info(state: &AppState) -> SystemInfo {
    let sys = state.sys.lock().await;
    SystemInfo {
        cpu_count: sys.cpus().len(),
        cpu_freq: sys.cpus().first().map(|c| c.frequency()).unwrap_or(0),
        total_memory: gib(sys.total_memory()),
        has_battery: collect_battery(&state.power_supply_root).is_some(),
    }
}

/// Top processes by CPU. Per-process CPU is a delta between refreshes, so take
/// two samples a short window apart; the lock is released while waiting.
pub async fn collect_top_processes(state: &AppState) -> Vec<ProcessInfo> {
    let kind = ProcessRefreshKind::nothing().with_cpu().with_memory();
    {
        let mut sys = state.sys.lock().await;
        sys.refresh_processes_specifics(ProcessesToUpdate::All, true, kind);
    }
    tokio::time::sleep(PROCESS_SAMPLE_WINDOW).await;

    let mut sys = state.sys.lock().await;
    sys.refresh_processes_specifics(ProcessesToUpdate::All, true, kind);
    sys.refresh_memory();

    let n_cpus = sys.cpus().len().max(1) as f32;
    let mem_total = sys.total_memory();
    let mut procs: Vec<ProcessInfo> = sys
        .processes()
        .values()
        .map(|p| ProcessInfo {
            pid: p.pid().as_u32(),
            name: p.name().to_string_lossy().into_owned(),
            cpu_percent: (p.cpu_usage() / n_cpus).clamp(0.0, 100.0),
            memory_percent: (percent_of(p.memory(), mem_total) * 100.0).round() / 100.0,
        })
        .collect();
    drop(sys);

    rank_processes(&mut procs, TOP_PROCESSES);
    procs
}

/// Sort by CPU descending and keep the first `k`.
pub fn rank_processes(procs: &mut Vec<ProcessInfo>, k: usize) {
    procs.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    procs.truncate(k);
}

// The disk mounted at `/`, else the largest one.
fn root_disk(disks: &Disks) -> DiskInfo {
    let list = disks.list();
    let disk = list
        .iter()
        .find(|d| d.mount_point() == Path::new("/"))
        .or_else(|| list.iter().max_by_key(|d| d.total_space()));
    let (total, free) = disk
        .map(|d| (d.total_space(), d.available_space()))
        .unwrap_or((0, 0));
    let used = total.saturating_sub(free);
    DiskInfo {
        percent: percent_of(used, total),
        used: gib(used),
        total: gib(total),
        free: gib(free),
    }
}

fn best_cpu_temp(components: &sysinfo::Components) -> Option<f32> {
    components
        .iter()
        .filter(|c| {
            let label = c.label().to_ascii_lowercase();
            label.contains("cpu")
                || label.contains("coretemp")
                || label.contains("package")
                || label.contains("tctl")
                || label.contains("tdie")
        })
        .filter_map(|c| c.temperature())
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(pid: u32, cpu: f32) -> ProcessInfo {
        ProcessInfo {
            pid,
            name: format!("p{pid}"),
            cpu_percent: cpu,
            memory_percent: 0.0,
        }
    }

    #[test]
    fn percent_handles_empty_total() {
        assert_eq!(percent_of(5, 0), 0.0);
        assert_eq!(percent_of(25, 100), 25.0);
        assert_eq!(percent_of(300, 100), 100.0);
    }

    #[test]
    fn ranking_keeps_highest_cpu_first() {
        let mut v = vec![proc(1, 2.0), proc(2, 50.0), proc(3, 0.0), proc(4, 10.0)];
        rank_processes(&mut v, 2);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].pid, 2);
    }
}
