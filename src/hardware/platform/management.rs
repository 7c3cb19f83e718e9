use std::fs;
use std::path::{Path, PathBuf};

use smbioslib::{DefinedStruct, SMBiosData, SMBiosString};
use tracing::debug;

use crate::error::CollectError;
use crate::hardware::platform::{read_to_string_trim, read_to_u64, sorted_entries};
use crate::hardware::sources::ManagementService;
use crate::hardware::types::{BaseboardRecord, FanRecord, SensorProbe, ThermalZone};

/// Placeholder strings firmware vendors leave in unset SMBIOS fields.
const SMBIOS_PLACEHOLDERS: &[&str] = &[
    "Not Specified",
    "To Be Filled By O.E.M.",
    "Default string",
    "None",
];

/// Hardware management backed by hwmon, thermal zones and the SMBIOS table.
pub struct SysfsManagement {
    sysfs_root: PathBuf,
}

impl SysfsManagement {
    pub fn new<P: Into<PathBuf>>(sysfs_root: P) -> Self {
        SysfsManagement {
            sysfs_root: sysfs_root.into(),
        }
    }

    /// `(chip directory, chip name, fan index)` for every `fanN_input` under hwmon.
    fn hwmon_fans(&self) -> Result<Vec<(PathBuf, String, u32)>, CollectError> {
        let mut fans = Vec::new();

        for chip in sorted_entries(self.sysfs_root.join("class/hwmon"))? {
            let chip_name = read_to_string_trim(chip.join("name")).unwrap_or_else(|| {
                chip.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default()
            });

            let mut indices: Vec<u32> = fs::read_dir(&chip)?
                .flatten()
                .filter_map(|entry| fan_index(&entry.file_name().to_string_lossy()))
                .collect();
            indices.sort_unstable();

            for index in indices {
                fans.push((chip.clone(), chip_name.clone(), index));
            }
        }

        Ok(fans)
    }

    fn baseboards_from_smbios(&self) -> Result<Vec<BaseboardRecord>, CollectError> {
        let table = self.sysfs_root.join("firmware/dmi/tables/DMI");
        let table_str = table.to_string_lossy();

        let smbios_data = match SMBiosData::try_load_from_file(&table_str, None) {
            Ok(data) => data,
            Err(_) => {
                let raw = fs::read(&table).map_err(|e| {
                    CollectError::query("SMBIOS", format!("{}: {}", table.display(), e))
                })?;
                SMBiosData::from_vec_and_version(raw, None)
            }
        };

        let boards = smbios_data
            .iter()
            .filter_map(|structure| match structure.defined_struct() {
                DefinedStruct::BaseBoardInformation(board) => Some(BaseboardRecord {
                    manufacturer: smbios_text(board.manufacturer()),
                    product: smbios_text(board.product()),
                    version: smbios_text(board.version()),
                    serial_number: smbios_text(board.serial_number()),
                }),
                _ => None,
            })
            .collect();

        Ok(boards)
    }

    /// The kernel's own copy of the board strings. Readable without root,
    /// except for the serial number.
    fn baseboard_from_dmi_id(&self) -> Option<BaseboardRecord> {
        let id = self.sysfs_root.join("class/dmi/id");
        if !id.is_dir() {
            return None;
        }
        let field = |name: &str| read_to_string_trim(id.join(name)).and_then(meaningful);

        Some(BaseboardRecord {
            manufacturer: field("board_vendor"),
            product: field("board_name"),
            version: field("board_version"),
            serial_number: field("board_serial"),
        })
    }
}

impl ManagementService for SysfsManagement {
    fn sensor_probes(&self) -> Result<Vec<SensorProbe>, CollectError> {
        let probes = self
            .hwmon_fans()?
            .into_iter()
            .map(|(chip, chip_name, index)| SensorProbe {
                description: fan_description(&chip, &chip_name, index),
                current_reading: read_to_u64(chip.join(format!("fan{}_input", index))),
            })
            .collect();
        Ok(probes)
    }

    fn fans(&self) -> Result<Vec<FanRecord>, CollectError> {
        let fans = self
            .hwmon_fans()?
            .into_iter()
            .map(|(chip, chip_name, index)| FanRecord {
                name: fan_description(&chip, &chip_name, index),
                desired_speed: read_to_u64(chip.join(format!("fan{}_target", index))),
            })
            .collect();
        Ok(fans)
    }

    fn thermal_zones(&self) -> Result<Vec<ThermalZone>, CollectError> {
        let mut zones = Vec::new();

        for zone in sorted_entries(self.sysfs_root.join("class/thermal"))? {
            let dir_name = match zone.file_name() {
                Some(n) => n.to_string_lossy().to_string(),
                None => continue,
            };
            if !dir_name.starts_with("thermal_zone") {
                continue;
            }

            let instance_name = match read_to_string_trim(zone.join("type")) {
                Some(kind) => format!("{} ({})", dir_name, kind),
                None => dir_name,
            };

            zones.push(ThermalZone {
                instance_name,
                active_cooling: has_active_trip_point(&zone)?,
            });
        }

        Ok(zones)
    }

    fn baseboards(&self) -> Result<Vec<BaseboardRecord>, CollectError> {
        match self.baseboards_from_smbios() {
            Ok(boards) if !boards.is_empty() => Ok(boards),
            Ok(_) => Ok(self.baseboard_from_dmi_id().into_iter().collect()),
            Err(e) => {
                debug!(error = %e, "SMBIOS table unreadable, falling back to dmi/id");
                self.baseboard_from_dmi_id().map(|b| vec![b]).ok_or(e)
            }
        }
    }
}

/// `fan3_input` -> 3
fn fan_index(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("fan")?
        .strip_suffix("_input")?
        .parse()
        .ok()
}

fn fan_description(chip: &Path, chip_name: &str, index: u32) -> String {
    read_to_string_trim(chip.join(format!("fan{}_label", index)))
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| format!("{} fan{}", chip_name, index))
}

fn has_active_trip_point(zone: &Path) -> Result<bool, CollectError> {
    for entry in fs::read_dir(zone)?.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with("trip_point_")
            && name.ends_with("_type")
            && read_to_string_trim(entry.path()).as_deref() == Some("active")
        {
            return Ok(true);
        }
    }
    Ok(false)
}

fn smbios_text(value: SMBiosString) -> Option<String> {
    value.to_utf8_lossy().and_then(meaningful)
}

fn meaningful(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || SMBIOS_PLACEHOLDERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}
