use std::time::Duration;

use crate::error::CollectError;
use crate::hardware::sources::SystemSource;
use crate::hardware::types::{CpuSnapshot, Section, SectionKind};

/// Utilization is averaged over this window.
pub const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

pub fn collect_cpu_info(source: &dyn SystemSource, window: Duration) -> Result<Section, CollectError> {
    let snapshot = source.cpu(window)?;
    Ok(render_cpu(&snapshot))
}

fn render_cpu(cpu: &CpuSnapshot) -> Section {
    let mut section = Section::new(SectionKind::Cpu);

    section.push(format!("CPU Temperature: {}", format_temperature(cpu.temperature)));

    if let Some(brand) = &cpu.brand {
        section.push(format!("Model: {}", brand));
    }

    match cpu.physical_cores {
        Some(cores) => section.push(format!("Physical cores: {}", cores)),
        None => section.push("Physical cores: unknown"),
    }
    section.push(format!("Total cores: {}", cpu.logical_cores));

    if let Some(freq) = &cpu.frequency {
        section.push(format!("Max Frequency: {:.2} MHz", freq.max_mhz));
        section.push(format!("Min Frequency: {:.2} MHz", freq.min_mhz));
        section.push(format!("Current Frequency: {:.2} MHz", freq.current_mhz));
    }

    section.push("CPU Usage Per Core:");
    for (core, usage) in cpu.per_core_usage.iter().enumerate() {
        section.push(format!("  Core {}: {:.1}%", core, usage));
    }
    section.push(format!("Total CPU Usage: {:.1}%", cpu.total_usage));

    section
}

pub fn format_temperature(celsius: Option<f32>) -> String {
    match celsius {
        Some(t) => format!("{:.1}°C", t),
        None => "unavailable".to_string(),
    }
}
