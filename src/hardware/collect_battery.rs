use tracing::debug;

use crate::error::CollectError;
use crate::hardware::sources::{BatterySource, Capability};
use crate::hardware::types::{Section, SectionKind};

/// Omitted entirely on machines without a battery.
pub fn collect_battery_info(
    battery: &Capability<Box<dyn BatterySource>>,
) -> Result<Section, CollectError> {
    let source = match battery.require() {
        Ok(source) => source,
        Err(e) => {
            debug!(error = %e, "battery section omitted");
            return Ok(Section::omitted(SectionKind::Battery));
        }
    };

    let status = match source.battery()? {
        Some(status) => status,
        None => return Ok(Section::omitted(SectionKind::Battery)),
    };

    let mut section = Section::new(SectionKind::Battery);
    section.push(format!("Percent: {:.0}%", status.percent));
    section.push(format!(
        "Plugged In: {}",
        if status.plugged_in { "Yes" } else { "No" }
    ));
    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::sources::fakes::FakeBattery;
    use crate::hardware::types::BatteryStatus;

    fn available(status: Option<BatteryStatus>) -> Capability<Box<dyn BatterySource>> {
        Capability::Available(Box::new(FakeBattery(status)))
    }

    #[test]
    fn test_absent_capability_omits_section() {
        let cap: Capability<Box<dyn BatterySource>> = Capability::Absent("no sysfs".into());
        let section = collect_battery_info(&cap).unwrap();
        assert!(section.is_omitted());
        assert_eq!(section.render(), "");
    }

    #[test]
    fn test_no_battery_omits_section() {
        let section = collect_battery_info(&available(None)).unwrap();
        assert!(section.is_omitted());
    }

    #[test]
    fn test_battery_lines() {
        let section = collect_battery_info(&available(Some(BatteryStatus {
            percent: 87.0,
            plugged_in: false,
        })))
        .unwrap();
        assert_eq!(section.lines, vec!["Percent: 87%", "Plugged In: No"]);
    }
}
