use tracing::debug;

use crate::error::CollectError;
use crate::hardware::collect_cpu::format_temperature;
use crate::hardware::sources::{Capability, GpuLibrary, GpuSession, SystemSource};
use crate::hardware::types::{FanReading, GpuFanEntry, Section, SectionKind};

pub const NVML_MISSING: &str = "GPU Fan Info: NVIDIA management library (NVML) not found. \
Install the NVIDIA driver to get NVIDIA GPU fan speed.";

pub fn collect_gpus(
    system: &dyn SystemSource,
    library: &Capability<Box<dyn GpuLibrary>>,
) -> Result<Section, CollectError> {
    let mut section = Section::new(SectionKind::Gpu);
    section.push(format!(
        "GPU Temperature: {}",
        format_temperature(system.gpu_temperature())
    ));

    let library = match library.require() {
        Ok(library) => library,
        Err(e) => {
            debug!(error = %e, "skipping GPU fan readings");
            section.push(NVML_MISSING);
            return Ok(section);
        }
    };

    section.push("GPU Fan Info (NVIDIA only):");
    match read_fan_entries(library.as_ref()) {
        Ok(entries) => {
            for entry in &entries {
                section.push(render_fan_entry(entry));
            }
        }
        Err(e) => section.push(format!("Could not read NVIDIA GPU fan info: {}", e)),
    }

    Ok(section)
}

/// Opens one library session, reads every device, and releases the session.
pub fn read_fan_entries(library: &dyn GpuLibrary) -> Result<Vec<GpuFanEntry>, CollectError> {
    let session = library.open()?;
    let count = session.device_count()?;
    let entries = (0..count).map(|index| read_fan_entry(session.as_ref(), index)).collect();
    drop(session);
    Ok(entries)
}

fn read_fan_entry(session: &dyn GpuSession, index: u32) -> GpuFanEntry {
    let name = session.device_name(index).unwrap_or_else(|e| {
        debug!(index, error = %e, "could not read GPU name");
        "unknown device".to_string()
    });

    let reading = match session.fan_speed(index) {
        Ok(speed) => FanReading::Percent(speed),
        Err(e) if e.is_unsupported() => FanReading::NotSupported,
        Err(e) => FanReading::Error(e.to_string()),
    };

    GpuFanEntry { index, name, reading }
}

fn render_fan_entry(entry: &GpuFanEntry) -> String {
    let prefix = format!("GPU {} ({})", entry.index, entry.name);
    match &entry.reading {
        FanReading::Percent(speed) => format!("{}: Fan Speed: {}%", prefix, speed),
        FanReading::NotSupported => format!("{}: Fan speed reading not supported.", prefix),
        FanReading::Error(message) => format!("{}: Error reading fan speed: {}", prefix, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::sources::fakes::{FakeFan, FakeGpu, FakeSystem};

    #[test]
    fn test_absent_library_emits_single_hint() {
        let library: Capability<Box<dyn GpuLibrary>> = Capability::Absent("not found".into());
        let section = collect_gpus(&FakeSystem::default(), &library).unwrap();
        assert_eq!(
            section.lines,
            vec!["GPU Temperature: unavailable".to_string(), NVML_MISSING.to_string()]
        );
    }

    #[test]
    fn test_one_line_per_device_for_each_outcome() {
        let gpu = FakeGpu::new(vec![
            ("GeForce RTX 3080", FakeFan::Speed(41)),
            ("Tesla T4", FakeFan::Unsupported),
            ("A100", FakeFan::Fails("Unknown Error")),
        ]);
        let sessions = gpu.open_sessions.clone();
        let library: Capability<Box<dyn GpuLibrary>> = Capability::Available(Box::new(gpu));
        let system = FakeSystem {
            gpu_temperature: Some(61.0),
            ..FakeSystem::default()
        };

        let section = collect_gpus(&system, &library).unwrap();

        assert_eq!(
            section.lines,
            vec![
                "GPU Temperature: 61.0°C",
                "GPU Fan Info (NVIDIA only):",
                "GPU 0 (GeForce RTX 3080): Fan Speed: 41%",
                "GPU 1 (Tesla T4): Fan speed reading not supported.",
                "GPU 2 (A100): Error reading fan speed: NVML query failed: Unknown Error",
            ]
        );
        assert_eq!(sessions.get(), 0, "session must be released");
    }

    #[test]
    fn test_open_failure_reports_single_line() {
        let mut gpu = FakeGpu::new(vec![("GeForce GTX 1080", FakeFan::Speed(30))]);
        gpu.fail_open = true;
        let library: Capability<Box<dyn GpuLibrary>> = Capability::Available(Box::new(gpu));

        let section = collect_gpus(&FakeSystem::default(), &library).unwrap();
        assert_eq!(
            section.lines[2],
            "Could not read NVIDIA GPU fan info: NVML query failed: Driver Not Loaded"
        );
        assert_eq!(section.lines.len(), 3);
    }

    #[test]
    fn test_repeated_reads_do_not_leak_sessions() {
        let gpu = FakeGpu::new(vec![("GeForce RTX 4090", FakeFan::Speed(0))]);
        for _ in 0..3 {
            let entries = read_fan_entries(&gpu).unwrap();
            assert_eq!(entries[0].reading, FanReading::Percent(0));
        }
        assert_eq!(gpu.open_sessions.get(), 0);
    }
}
