use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use sysinfo::{Components, Disks, System, MINIMUM_CPU_UPDATE_INTERVAL};
use tracing::debug;

use crate::error::CollectError;
use crate::hardware::collect_memory::used_percent;
use crate::hardware::platform::privilege::current_login;
use crate::hardware::platform::read_to_string_trim;
use crate::hardware::sources::{SystemSource, VolumeSource};
use crate::hardware::types::{
    CpuFrequency, CpuSnapshot, DiskEntry, MemorySnapshot, SystemIdentity, VolumeCapacity,
};

/// Component labels that belong to the CPU package, most specific first.
const CPU_SENSOR_LABELS: &[&str] = &["package id", "tctl", "tdie", "coretemp", "k10temp", "cpu"];
const GPU_SENSOR_LABELS: &[&str] = &["amdgpu", "nouveau", "nvidia", "radeon", "gpu", "edge"];

/// Identity, CPU, memory and temperature readings backed by `sysinfo`.
pub struct SysinfoSource {
    sysfs_root: PathBuf,
}

impl SysinfoSource {
    pub fn with_sysfs_root<P: Into<PathBuf>>(root: P) -> Self {
        SysinfoSource {
            sysfs_root: root.into(),
        }
    }
}

impl SystemSource for SysinfoSource {
    fn identity(&self) -> Result<SystemIdentity, CollectError> {
        Ok(SystemIdentity {
            os_name: kernel_os_name(Path::new("/proc/sys/kernel/ostype")),
            kernel_release: System::kernel_version().unwrap_or_else(|| "unknown".to_string()),
            os_version: System::long_os_version(),
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
            boot_time: System::boot_time(),
            login: current_login(),
        })
    }

    fn cpu(&self, window: Duration) -> Result<CpuSnapshot, CollectError> {
        let mut sys = System::new();

        // Usage is a delta between two refreshes, so sleep once in between.
        sys.refresh_cpu_all();
        thread::sleep(window.max(MINIMUM_CPU_UPDATE_INTERVAL));
        sys.refresh_cpu_all();

        let cpus = sys.cpus();
        if cpus.is_empty() {
            return Err(CollectError::query("sysinfo", "no CPU detected"));
        }

        let per_core_usage: Vec<f32> = cpus.iter().map(|cpu| cpu.cpu_usage()).collect();
        let current_mhz =
            cpus.iter().map(|cpu| cpu.frequency() as f64).sum::<f64>() / cpus.len() as f64;
        let brand = Some(cpus[0].brand().trim().to_string()).filter(|b| !b.is_empty());

        let frequency = read_cpufreq_range(&self.sysfs_root).map(|(min_mhz, max_mhz)| CpuFrequency {
            min_mhz,
            max_mhz,
            current_mhz,
        });

        Ok(CpuSnapshot {
            brand,
            physical_cores: sys.physical_core_count(),
            logical_cores: cpus.len(),
            frequency,
            per_core_usage,
            total_usage: sys.global_cpu_usage(),
            temperature: pick_temperature(&read_temperatures(), CPU_SENSOR_LABELS),
        })
    }

    fn memory(&self) -> Result<MemorySnapshot, CollectError> {
        let mut sys = System::new();
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(CollectError::query("sysinfo", "memory totals unavailable"));
        }
        let available = sys.available_memory();
        let swap_total = sys.total_swap();
        let swap_used = sys.used_swap();

        Ok(MemorySnapshot {
            total_bytes: total,
            available_bytes: available,
            used_bytes: sys.used_memory(),
            percent: used_percent(total, available),
            swap_total_bytes: swap_total,
            swap_used_bytes: swap_used,
            swap_free_bytes: sys.free_swap(),
            swap_percent: used_percent(swap_total, swap_total.saturating_sub(swap_used)),
        })
    }

    fn gpu_temperature(&self) -> Option<f32> {
        pick_temperature(&read_temperatures(), GPU_SENSOR_LABELS)
    }
}

/// Mounted volumes from `sysinfo::Disks`.
pub struct SysinfoVolumes;

impl VolumeSource for SysinfoVolumes {
    fn volumes(&self) -> Result<Vec<DiskEntry>, CollectError> {
        let disks = Disks::new_with_refreshed_list();

        let entries = disks
            .list()
            .iter()
            .map(|disk| {
                let device = disk.name().to_string_lossy().to_string();
                let total = disk.total_space();
                let capacity = if total == 0 {
                    VolumeCapacity::Unreadable("capacity not reported".to_string())
                } else {
                    VolumeCapacity::Bytes {
                        total,
                        free: disk.available_space(),
                    }
                };
                DiskEntry {
                    device,
                    mount_point: disk.mount_point().display().to_string(),
                    file_system: disk.file_system().to_string_lossy().to_string(),
                    removable: disk.is_removable(),
                    capacity,
                }
            })
            .collect();

        Ok(entries)
    }
}

fn read_temperatures() -> Vec<(String, f32)> {
    let components = Components::new_with_refreshed_list();
    components
        .list()
        .iter()
        .map(|c| (c.label().to_string(), c.temperature()))
        .filter(|(_, celsius)| celsius.is_finite() && *celsius > 0.0)
        .collect()
}

/// Kernel OS name as uname reports it ("Linux"), not the distribution.
pub fn kernel_os_name(ostype: &Path) -> String {
    read_to_string_trim(ostype).unwrap_or_else(|| {
        let os = std::env::consts::OS;
        let mut chars = os.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => "unknown".to_string(),
        }
    })
}

/// First reading whose label matches the earliest entry of `wanted`.
pub fn pick_temperature(readings: &[(String, f32)], wanted: &[&str]) -> Option<f32> {
    wanted.iter().find_map(|needle| {
        readings
            .iter()
            .find(|(label, _)| label.to_lowercase().contains(needle))
            .map(|(_, celsius)| *celsius)
    })
}

/// Scaling limits of cpu0 in MHz, if the kernel exposes cpufreq.
pub fn read_cpufreq_range(sysfs_root: &Path) -> Option<(f64, f64)> {
    let cpufreq = sysfs_root.join("devices/system/cpu/cpu0/cpufreq");
    let read_khz = |file: &str| -> Option<f64> {
        fs::read_to_string(cpufreq.join(file))
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
    };

    match (read_khz("cpuinfo_min_freq"), read_khz("cpuinfo_max_freq")) {
        (Some(min), Some(max)) => Some((min / 1000.0, max / 1000.0)),
        _ => {
            debug!(path = %cpufreq.display(), "cpufreq limits not exposed");
            None
        }
    }
}
