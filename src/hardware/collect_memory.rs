use crate::error::CollectError;
use crate::hardware::sources::SystemSource;
use crate::hardware::types::{MemorySnapshot, Section, SectionKind};

const MB: u64 = 1024 * 1024;

pub fn collect_memory_info(source: &dyn SystemSource) -> Result<Section, CollectError> {
    let memory = source.memory()?;
    Ok(render_memory(&memory))
}

fn render_memory(memory: &MemorySnapshot) -> Section {
    let mut section = Section::new(SectionKind::Memory);

    section.push(format!("Total: {} MB", memory.total_bytes / MB));
    section.push(format!("Available: {} MB", memory.available_bytes / MB));
    section.push(format!(
        "Used: {} MB ({:.1}%)",
        memory.used_bytes / MB,
        memory.percent
    ));
    section.push(format!("Swap Total: {} MB", memory.swap_total_bytes / MB));
    section.push(format!(
        "Swap Used: {} MB ({:.1}%)",
        memory.swap_used_bytes / MB,
        memory.swap_percent
    ));

    section
}

/// Share of `total` that is not available, as the OS reports "percent used".
pub fn used_percent(total: u64, available: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let used = total.saturating_sub(available) as f64;
    (used / total as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::sources::fakes::FakeSystem;

    #[test]
    fn test_memory_lines() {
        let section = collect_memory_info(&FakeSystem::default()).unwrap();
        assert_eq!(
            section.lines,
            vec![
                "Total: 16384 MB",
                "Available: 8192 MB",
                "Used: 8192 MB (50.0%)",
                "Swap Total: 2048 MB",
                "Swap Used: 0 MB (0.0%)",
            ]
        );
    }

    #[test]
    fn test_percent_not_recomputed_from_megabytes() {
        let memory = MemorySnapshot {
            total_bytes: 3 * MB + 512 * 1024,
            available_bytes: MB,
            used_bytes: 2 * MB + 1023,
            percent: 71.4,
            swap_total_bytes: 0,
            swap_used_bytes: 0,
            swap_free_bytes: 0,
            swap_percent: 0.0,
        };
        let section = render_memory(&memory);
        assert_eq!(section.lines[0], "Total: 3 MB");
        assert_eq!(section.lines[2], "Used: 2 MB (71.4%)");
    }

    #[test]
    fn test_used_percent() {
        assert_eq!(used_percent(0, 0), 0.0);
        assert_eq!(used_percent(16384, 8192), 50.0);
        assert_eq!(used_percent(3, 1), 66.7);
    }
}
