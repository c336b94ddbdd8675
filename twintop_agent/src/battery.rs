//! Battery state from the Linux power_supply class.
//!
//! sysinfo has no battery support, so on Linux we read `/sys/class/power_supply`
//! directly. Other platforms report no battery.

use std::fs;
use std::path::Path;

use crate::types::BatteryInfo;

pub const POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

/// Battery reading for this platform, `None` when the machine has no battery.
pub fn collect_battery(root: &Path) -> Option<BatteryInfo> {
    if cfg!(target_os = "linux") {
        read_battery(root)
    } else {
        None
    }
}

/// Parse a power_supply tree: first `type == Battery` entry (by name) supplies
/// capacity and status; any online `Mains`/`USB` supply means plugged.
pub fn read_battery(root: &Path) -> Option<BatteryInfo> {
    let entries = fs::read_dir(root).ok()?;
    let mut dirs: Vec<_> = entries.flatten().map(|e| e.path()).collect();
    dirs.sort();

    let mut battery_dir = None;
    let mut ac_online = false;
    for dir in &dirs {
        match read_trimmed(&dir.join("type")).as_deref() {
            Some("Battery") => {
                if battery_dir.is_none() && read_first_f64(&dir.join("capacity")).is_some() {
                    battery_dir = Some(dir.clone());
                }
            }
            Some("Mains") | Some("USB") => {
                if read_first_f64(&dir.join("online")).is_some_and(|v| v > 0.0) {
                    ac_online = true;
                }
            }
            _ => {}
        }
    }

    let dir = battery_dir?;
    let percent = read_first_f64(&dir.join("capacity"))?.clamp(0.0, 100.0);
    let status = read_trimmed(&dir.join("status"))
        .unwrap_or_default()
        .to_ascii_lowercase();
    let plugged = ac_online || matches!(status.as_str(), "charging" | "full" | "not charging");
    let time_left = if plugged { None } else { seconds_left(&dir) };

    Some(BatteryInfo {
        percent,
        plugged,
        time_left,
    })
}

// energy_* is in µWh with power_now in µW; charge_* is µAh with current_now in µA.
fn seconds_left(dir: &Path) -> Option<u64> {
    let pairs = [("energy_now", "power_now"), ("charge_now", "current_now")];
    pairs.iter().find_map(|(amount, rate)| {
        let amount = read_first_f64(&dir.join(amount))?;
        let rate = read_first_f64(&dir.join(rate))?;
        if rate <= 0.0 {
            return None;
        }
        Some((amount / rate * 3600.0).round() as u64)
    })
}

fn read_trimmed(path: &Path) -> Option<String> {
    let s = fs::read_to_string(path).ok()?;
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

fn read_first_f64(path: &Path) -> Option<f64> {
    read_trimmed(path)?.split_whitespace().next()?.parse().ok()
}
