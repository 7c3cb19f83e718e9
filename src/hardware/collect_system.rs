use chrono::{DateTime, Local, TimeZone, Utc};

use crate::error::CollectError;
use crate::hardware::sources::SystemSource;
use crate::hardware::types::{Section, SectionKind, SystemIdentity};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn collect_system_info(source: &dyn SystemSource) -> Result<Section, CollectError> {
    let identity = source.identity()?;
    Ok(render_system(&identity, Utc::now()))
}

fn render_system(identity: &SystemIdentity, now: DateTime<Utc>) -> Section {
    let mut section = Section::new(SectionKind::System);

    section.push(format!(
        "Current Date and Time: {} UTC",
        now.format(TIMESTAMP_FORMAT)
    ));
    section.push(format!("Current User's Login: {}", identity.login));
    section.push(format!(
        "Platform: {} {}",
        identity.os_name, identity.kernel_release
    ));
    if let Some(version) = &identity.os_version {
        section.push(format!("OS Version: {}", version));
    }
    section.push(format!("Hostname: {}", identity.hostname));
    section.push(format!("Boot Time: {}", format_boot_time(identity.boot_time)));

    section
}

fn format_boot_time(boot_time: u64) -> String {
    match Local.timestamp_opt(boot_time as i64, 0).single() {
        Some(at) => at.format(TIMESTAMP_FORMAT).to_string(),
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::sources::fakes::FakeSystem;

    fn identity() -> SystemIdentity {
        SystemIdentity {
            os_name: "Linux".to_string(),
            kernel_release: "6.8.0-45-generic".to_string(),
            os_version: Some("Linux 24.04 Ubuntu".to_string()),
            hostname: "rack-07".to_string(),
            boot_time: 1_700_000_000,
            login: "ops".to_string(),
        }
    }

    #[test]
    fn test_render_system_lines() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let section = render_system(&identity(), now);

        assert_eq!(section.title, "System Info");
        assert_eq!(section.lines[0], "Current Date and Time: 2024-03-01 12:30:05 UTC");
        assert_eq!(section.lines[1], "Current User's Login: ops");
        assert_eq!(section.lines[2], "Platform: Linux 6.8.0-45-generic");
        assert_eq!(section.lines[3], "OS Version: Linux 24.04 Ubuntu");
        assert_eq!(section.lines[4], "Hostname: rack-07");
        assert!(section.lines[5].starts_with("Boot Time: 2023-11-1"));
    }

    #[test]
    fn test_os_version_line_is_optional() {
        let mut id = identity();
        id.os_version = None;
        let section = render_system(&id, Utc::now());
        assert_eq!(section.lines.len(), 5);
        assert!(!section.lines.iter().any(|l| l.starts_with("OS Version")));
    }

    #[test]
    fn test_identity_failure_propagates() {
        let source = FakeSystem {
            fail_identity: true,
            ..FakeSystem::default()
        };
        assert!(collect_system_info(&source).is_err());
    }
}
