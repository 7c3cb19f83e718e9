// Linux-backed implementations of the capability traits
pub mod iproute;
pub mod management;
pub mod nvml;
pub mod power_supply;
pub mod privilege;
pub mod sysinfo_source;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::CollectError;
use crate::hardware::sources::{BatterySource, Capabilities, Capability, ManagementService};

pub const SYSFS_ROOT: &str = "/sys";

/// Resolves every data source once. Collectors never re-probe.
pub fn detect_capabilities() -> Capabilities {
    let sysfs = Path::new(SYSFS_ROOT);

    let battery: Capability<Box<dyn BatterySource>> = {
        let source = power_supply::PowerSupplySource::new(sysfs);
        if source.is_present() {
            Capability::Available(Box::new(source))
        } else {
            Capability::Absent("no power_supply class".to_string())
        }
    };

    let management: Capability<Box<dyn ManagementService>> =
        if cfg!(target_os = "linux") && sysfs.join("class").is_dir() {
            Capability::Available(Box::new(management::SysfsManagement::new(sysfs)))
        } else {
            Capability::Absent(format!("{}/class not mounted", SYSFS_ROOT))
        };

    let gpu = nvml::detect_gpu_library();
    let elevated = privilege::is_elevated();

    info!(
        battery = battery.is_available(),
        gpu = gpu.is_available(),
        management = management.is_available(),
        elevated,
        "capabilities detected"
    );

    Capabilities {
        system: Box::new(sysinfo_source::SysinfoSource::with_sysfs_root(sysfs)),
        volumes: Box::new(sysinfo_source::SysinfoVolumes),
        interfaces: Box::new(iproute::IpRouteSource),
        battery,
        gpu,
        management,
        elevated,
    }
}

pub(crate) fn read_to_string_trim<P: AsRef<Path>>(path: P) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub(crate) fn read_to_u64<P: AsRef<Path>>(path: P) -> Option<u64> {
    let s = read_to_string_trim(path)?;
    s.parse::<u64>().ok()
}

/// Directory entries sorted by name, so sysfs walks are deterministic.
pub(crate) fn sorted_entries<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, CollectError> {
    let dir = dir.as_ref();
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?.flatten().map(|e| e.path()).collect();
    entries.sort();
    debug!(dir = %dir.display(), count = entries.len(), "listed sysfs directory");
    Ok(entries)
}
