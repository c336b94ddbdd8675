//! Shared agent state: persistent sysinfo handles reused across requests.

use std::path::PathBuf;
use std::sync::Arc;
use sysinfo::{
    Components, CpuRefreshKind, Disks, MemoryRefreshKind, Networks, ProcessRefreshKind,
    RefreshKind, System,
};
use tokio::sync::Mutex;

pub type SharedSystem = Arc<Mutex<System>>;
pub type SharedNetworks = Arc<Mutex<Networks>>;
pub type SharedComponents = Arc<Mutex<Components>>;
pub type SharedDisks = Arc<Mutex<Disks>>;

#[derive(Clone)]
pub struct AppState {
    // Persistent sysinfo handles; CPU usage needs two refreshes to be meaningful,
    // so the System must outlive a single request.
    pub sys: SharedSystem,
    pub networks: SharedNetworks,
    pub components: SharedComponents,
    pub disks: SharedDisks,

    // Root of the power_supply class (overridable for tests)
    pub power_supply_root: PathBuf,
}

impl AppState {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything())
            .with_processes(ProcessRefreshKind::everything());
        let mut sys = System::new_with_specifics(refresh_kind);
        sys.refresh_all();

        Self {
            sys: Arc::new(Mutex::new(sys)),
            networks: Arc::new(Mutex::new(Networks::new_with_refreshed_list())),
            components: Arc::new(Mutex::new(Components::new_with_refreshed_list())),
            disks: Arc::new(Mutex::new(Disks::new_with_refreshed_list())),
            power_supply_root: PathBuf::from(crate::battery::POWER_SUPPLY_ROOT),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
