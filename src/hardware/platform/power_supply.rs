use std::path::{Path, PathBuf};

use crate::error::CollectError;
use crate::hardware::platform::{read_to_string_trim, read_to_u64, sorted_entries};
use crate::hardware::sources::BatterySource;
use crate::hardware::types::BatteryStatus;

/// Battery state from `/sys/class/power_supply`.
pub struct PowerSupplySource {
    class_path: PathBuf,
}

impl PowerSupplySource {
    pub fn new<P: AsRef<Path>>(sysfs_root: P) -> Self {
        PowerSupplySource {
            class_path: sysfs_root.as_ref().join("class/power_supply"),
        }
    }

    /// Whether the platform exposes a power supply class at all.
    pub fn is_present(&self) -> bool {
        self.class_path.is_dir()
    }
}

impl BatterySource for PowerSupplySource {
    fn battery(&self) -> Result<Option<BatteryStatus>, CollectError> {
        let supplies = sorted_entries(&self.class_path)?;

        let mut battery: Option<PathBuf> = None;
        let mut external_online: Option<bool> = None;

        for psu_path in supplies {
            let kind = read_to_string_trim(psu_path.join("type")).unwrap_or_default();
            match kind.as_str() {
                "Battery" => {
                    let present = read_to_u64(psu_path.join("present")).unwrap_or(1);
                    if battery.is_none() && present == 1 {
                        battery = Some(psu_path);
                    }
                }
                "Mains" | "USB" | "USB_C" | "USB_PD" => {
                    let online = read_to_u64(psu_path.join("online")) == Some(1);
                    external_online = Some(external_online.unwrap_or(false) || online);
                }
                _ => {}
            }
        }

        let battery = match battery {
            Some(path) => path,
            None => return Ok(None),
        };

        let percent = charge_percent(&battery).ok_or_else(|| {
            CollectError::query("power_supply", format!("no charge level in {}", battery.display()))
        })?;

        let plugged_in = external_online.unwrap_or_else(|| {
            matches!(
                read_to_string_trim(battery.join("status")).as_deref(),
                Some("Charging") | Some("Full")
            )
        });

        Ok(Some(BatteryStatus {
            percent,
            plugged_in,
        }))
    }
}

fn charge_percent(battery: &Path) -> Option<f32> {
    let ratio = |now: &str, full: &str| -> Option<f32> {
        let now = read_to_u64(battery.join(now))?;
        let full = read_to_u64(battery.join(full)).filter(|f| *f > 0)?;
        Some((now as f32 / full as f32 * 100.0).min(100.0))
    };

    ratio("energy_now", "energy_full")
        .or_else(|| ratio("charge_now", "charge_full"))
        .or_else(|| read_to_u64(battery.join("capacity")).map(|c| c as f32))
}
