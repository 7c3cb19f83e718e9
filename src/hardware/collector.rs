use std::time::Duration;

use tracing::{debug, warn};

use crate::hardware;
use crate::hardware::sources::Capabilities;
use crate::hardware::types::{Report, Section, SectionKind};

pub const PRIVILEGE_WARNING: &str =
    "Please run this program as root (administrator) for accurate hardware readings.";

/// Builds a fresh report: every section in fixed order, failures inlined.
pub fn collect_full_report(caps: &Capabilities, sample_window: Duration) -> Report {
    let warning = if caps.elevated {
        None
    } else {
        Some(PRIVILEGE_WARNING.to_string())
    };

    let sections = SectionKind::ORDER
        .iter()
        .map(|kind| collect_section(caps, *kind, sample_window))
        .collect();

    Report { warning, sections }
}

/// Runs one collector. A collector error becomes a one-line diagnostic section.
pub fn collect_section(caps: &Capabilities, kind: SectionKind, sample_window: Duration) -> Section {
    debug!(section = kind.title(), "collecting");

    let result = match kind {
        SectionKind::System => hardware::collect_system_info(caps.system.as_ref()),
        SectionKind::Cpu => hardware::collect_cpu_info(caps.system.as_ref(), sample_window),
        SectionKind::CpuFan => {
            hardware::collect_cpu_fan_info(caps.management.available().map(|m| m.as_ref()))
        }
        SectionKind::Memory => hardware::collect_memory_info(caps.system.as_ref()),
        SectionKind::Disk => hardware::collect_disks(caps.volumes.as_ref()),
        SectionKind::Network => hardware::collect_network_info(caps.interfaces.as_ref()),
        SectionKind::Battery => hardware::collect_battery_info(&caps.battery),
        SectionKind::Gpu => hardware::collect_gpus(caps.system.as_ref(), &caps.gpu),
        SectionKind::Motherboard => hardware::collect_motherboard_info(&caps.management),
    };

    result.unwrap_or_else(|e| {
        warn!(section = kind.title(), error = %e, "collector failed");
        Section::diagnostic(kind, &e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::collect_gpus::NVML_MISSING;
    use crate::hardware::collect_motherboard::MANAGEMENT_MISSING;
    use crate::hardware::sources::fakes::{bare_desktop, FakeSystem};

    fn kinds(report: &Report) -> Vec<SectionKind> {
        report.sections.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_bare_desktop_report() {
        let report = collect_full_report(&bare_desktop(), Duration::ZERO);

        assert_eq!(kinds(&report), SectionKind::ORDER.to_vec());
        assert!(report.warning.is_none());

        let cpu = report.section(SectionKind::Cpu).unwrap();
        assert_eq!(cpu.lines[0], "CPU Temperature: unavailable");

        assert!(report.section(SectionKind::Battery).unwrap().is_omitted());

        let gpu = report.section(SectionKind::Gpu).unwrap();
        assert_eq!(gpu.lines.len(), 2);
        assert_eq!(gpu.lines[1], NVML_MISSING);

        let board = report.section(SectionKind::Motherboard).unwrap();
        assert_eq!(board.lines, vec![MANAGEMENT_MISSING]);

        let memory = report.section(SectionKind::Memory).unwrap();
        assert!(memory.lines.contains(&"Used: 8192 MB (50.0%)".to_string()));

        let text = report.render();
        assert!(text.starts_with("System Info\n"));
        assert!(!text.contains("Battery Info"));
        assert!(text.ends_with(MANAGEMENT_MISSING));
    }

    #[test]
    fn test_unprivileged_report_carries_warning() {
        let mut caps = bare_desktop();
        caps.elevated = false;
        let report = collect_full_report(&caps, Duration::ZERO);
        assert_eq!(report.warning.as_deref(), Some(PRIVILEGE_WARNING));
        assert!(report.render().starts_with(PRIVILEGE_WARNING));
    }

    #[test]
    fn test_failing_collector_keeps_slot() {
        let mut caps = bare_desktop();
        caps.system = Box::new(FakeSystem {
            fail_identity: true,
            ..FakeSystem::default()
        });
        let report = collect_full_report(&caps, Duration::ZERO);

        assert_eq!(kinds(&report), SectionKind::ORDER.to_vec());
        let system = report.section(SectionKind::System).unwrap();
        assert_eq!(
            system.lines,
            vec!["Could not collect System Info: sysinfo query failed: identity unavailable"]
        );
        assert!(!report.section(SectionKind::Cpu).unwrap().lines.is_empty());
    }

    #[test]
    fn test_rebuilt_report_is_structurally_identical() {
        let caps = bare_desktop();
        let first = collect_full_report(&caps, Duration::ZERO);
        let second = collect_full_report(&caps, Duration::ZERO);

        for (a, b) in first.sections.iter().zip(&second.sections) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.lines.len(), b.lines.len());
            if a.kind != SectionKind::System {
                assert_eq!(a.lines, b.lines);
            }
        }
    }
}
