use tracing::debug;

use crate::error::CollectError;
use crate::hardware::sources::ManagementService;
use crate::hardware::types::{Section, SectionKind};

pub const FAN_UNAVAILABLE: &str =
    "CPU Fan info not available through the hardware management interface.";

/// One way of reading fan data. `None` means "try the next one".
type FanStrategy = fn(&dyn ManagementService) -> Option<Vec<String>>;

/// Tried in order; the first strategy that yields a line wins.
const FAN_STRATEGIES: [(&str, FanStrategy); 3] = [
    ("sensor probes", cpu_probe_readings),
    ("fan enumeration", fan_speeds),
    ("thermal zones", actively_cooled_zones),
];

pub fn collect_cpu_fan_info(
    management: Option<&dyn ManagementService>,
) -> Result<Section, CollectError> {
    let mut section = Section::new(SectionKind::CpuFan);

    let lines = management.and_then(|service| {
        FAN_STRATEGIES.iter().find_map(|(name, strategy)| {
            let lines = strategy(service);
            if lines.is_none() {
                debug!(strategy = *name, "no fan data");
            }
            lines
        })
    });

    match lines {
        Some(lines) => lines.into_iter().for_each(|line| section.push(line)),
        None => section.push(FAN_UNAVAILABLE),
    }

    Ok(section)
}

fn non_empty(lines: Vec<String>) -> Option<Vec<String>> {
    if lines.is_empty() {
        None
    } else {
        Some(lines)
    }
}

fn swallow<T>(what: &str, result: Result<T, CollectError>) -> Option<T> {
    result
        .map_err(|e| debug!(error = %e, "{} query failed", what))
        .ok()
}

fn cpu_probe_readings(service: &dyn ManagementService) -> Option<Vec<String>> {
    let probes = swallow("sensor probe", service.sensor_probes())?;
    let lines = probes
        .iter()
        .filter(|probe| probe.description.contains("CPU"))
        .filter_map(|probe| probe.current_reading)
        .map(|rpm| format!("CPU Fan: {} RPM", rpm))
        .collect();
    non_empty(lines)
}

fn fan_speeds(service: &dyn ManagementService) -> Option<Vec<String>> {
    let fans = swallow("fan", service.fans())?;
    let lines = fans
        .iter()
        .map(|fan| match fan.desired_speed {
            Some(rpm) => format!("Fan: {}, Speed: {} RPM", fan.name, rpm),
            None => format!("Fan: {}, Speed: unknown", fan.name),
        })
        .collect();
    non_empty(lines)
}

fn actively_cooled_zones(service: &dyn ManagementService) -> Option<Vec<String>> {
    let zones = swallow("thermal zone", service.thermal_zones())?;
    let lines = zones
        .iter()
        .filter(|zone| zone.active_cooling)
        .map(|zone| format!("Thermal Zone: {} has active cooling", zone.instance_name))
        .collect();
    non_empty(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::sources::fakes::FakeManagement;
    use crate::hardware::types::{FanRecord, SensorProbe, ThermalZone};

    fn probe(description: &str, reading: Option<u64>) -> SensorProbe {
        SensorProbe {
            description: description.to_string(),
            current_reading: reading,
        }
    }

    fn fan(name: &str, speed: Option<u64>) -> FanRecord {
        FanRecord {
            name: name.to_string(),
            desired_speed: speed,
        }
    }

    fn zone(name: &str, active: bool) -> ThermalZone {
        ThermalZone {
            instance_name: name.to_string(),
            active_cooling: active,
        }
    }

    #[test]
    fn test_probe_tier_wins_and_stops_chain() {
        let service = FakeManagement {
            probes: Some(vec![probe("CPU Fan", Some(1200)), probe("Chassis", Some(800))]),
            fans: Some(vec![fan("fan1", Some(900))]),
            zones: Some(vec![zone("acpitz", true)]),
            ..FakeManagement::default()
        };
        let section = collect_cpu_fan_info(Some(&service)).unwrap();

        assert_eq!(section.lines, vec!["CPU Fan: 1200 RPM"]);
        assert_eq!(service.calls.get(), [1, 0, 0, 0]);
    }

    #[test]
    fn test_probe_without_reading_falls_through_to_fans() {
        let service = FakeManagement {
            probes: Some(vec![probe("CPU Fan", None)]),
            fans: Some(vec![fan("nct6775 fan1", Some(950)), fan("nct6775 fan2", None)]),
            zones: Some(vec![zone("acpitz", true)]),
            ..FakeManagement::default()
        };
        let section = collect_cpu_fan_info(Some(&service)).unwrap();

        assert_eq!(
            section.lines,
            vec![
                "Fan: nct6775 fan1, Speed: 950 RPM",
                "Fan: nct6775 fan2, Speed: unknown",
            ]
        );
        assert_eq!(service.calls.get(), [1, 1, 0, 0]);
    }

    #[test]
    fn test_failed_tiers_fall_through_to_thermal_zones() {
        let service = FakeManagement {
            probes: None,
            fans: Some(Vec::new()),
            zones: Some(vec![zone("thermal_zone0 (acpitz)", true), zone("thermal_zone1 (x86_pkg_temp)", false)]),
            ..FakeManagement::default()
        };
        let section = collect_cpu_fan_info(Some(&service)).unwrap();

        assert_eq!(
            section.lines,
            vec!["Thermal Zone: thermal_zone0 (acpitz) has active cooling"]
        );
        assert_eq!(service.calls.get(), [1, 1, 1, 0]);
    }

    #[test]
    fn test_all_tiers_fail_emits_single_line() {
        let service = FakeManagement {
            probes: Some(vec![probe("Chassis", Some(700))]),
            fans: None,
            zones: Some(vec![zone("acpitz", false)]),
            ..FakeManagement::default()
        };
        let section = collect_cpu_fan_info(Some(&service)).unwrap();
        assert_eq!(section.lines, vec![FAN_UNAVAILABLE]);
    }

    #[test]
    fn test_absent_service_emits_single_line() {
        let section = collect_cpu_fan_info(None).unwrap();
        assert_eq!(section.lines, vec![FAN_UNAVAILABLE]);
    }
}
