use serde::Serialize;

use crate::error::CollectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    System,
    Cpu,
    CpuFan,
    Memory,
    Disk,
    Network,
    Battery,
    Gpu,
    Motherboard,
}

impl SectionKind {
    /// Fixed report order.
    pub const ORDER: [SectionKind; 9] = [
        SectionKind::System,
        SectionKind::Cpu,
        SectionKind::CpuFan,
        SectionKind::Memory,
        SectionKind::Disk,
        SectionKind::Network,
        SectionKind::Battery,
        SectionKind::Gpu,
        SectionKind::Motherboard,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::System => "System Info",
            SectionKind::Cpu => "CPU Info",
            SectionKind::CpuFan => "CPU Fan Info",
            SectionKind::Memory => "Memory Info",
            SectionKind::Disk => "Disk Info",
            SectionKind::Network => "Network Info",
            SectionKind::Battery => "Battery Info",
            SectionKind::Gpu => "GPU Info",
            SectionKind::Motherboard => "Motherboard Info",
        }
    }
}

/// A titled block of report text.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: &'static str,
    pub lines: Vec<String>,
    /// Omitted sections keep their slot in the report but render as nothing.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub omitted: bool,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Section {
            kind,
            title: kind.title(),
            lines: Vec::new(),
            omitted: false,
        }
    }

    pub fn omitted(kind: SectionKind) -> Self {
        Section {
            omitted: true,
            ..Section::new(kind)
        }
    }

    /// Stand-in for a section whose collector failed as a whole.
    pub fn diagnostic(kind: SectionKind, err: &CollectError) -> Self {
        let mut section = Section::new(kind);
        section.push(format!("Could not collect {}: {}", kind.title(), err));
        section
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn is_omitted(&self) -> bool {
        self.omitted
    }

    pub fn render(&self) -> String {
        if self.is_omitted() {
            return String::new();
        }
        let mut text = String::from(self.title);
        for line in &self.lines {
            text.push('\n');
            text.push_str(line);
        }
        text
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub warning: Option<String>,
    pub sections: Vec<Section>,
}

impl Report {
    #[cfg(test)]
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn render(&self) -> String {
        let mut blocks: Vec<String> = Vec::new();
        if let Some(warning) = &self.warning {
            blocks.push(warning.clone());
        }
        blocks.extend(
            self.sections
                .iter()
                .filter(|s| !s.is_omitted())
                .map(Section::render),
        );
        blocks.join("\n\n")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemIdentity {
    pub os_name: String,
    pub kernel_release: String,
    pub os_version: Option<String>,
    pub hostname: String,
    /// Seconds since the unix epoch.
    pub boot_time: u64,
    pub login: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CpuFrequency {
    pub min_mhz: f64,
    pub max_mhz: f64,
    pub current_mhz: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CpuSnapshot {
    pub brand: Option<String>,
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    pub frequency: Option<CpuFrequency>,
    /// Indexed by core number.
    pub per_core_usage: Vec<f32>,
    pub total_usage: f32,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemorySnapshot {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
    /// As reported by the source, not derived from the truncated MB figures.
    pub percent: f64,
    pub swap_total_bytes: u64,
    pub swap_used_bytes: u64,
    pub swap_free_bytes: u64,
    pub swap_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub enum VolumeCapacity {
    Bytes { total: u64, free: u64 },
    Unreadable(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct DiskEntry {
    pub device: String,
    pub mount_point: String,
    pub file_system: String,
    pub removable: bool,
    pub capacity: VolumeCapacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AddressFamily {
    Inet,
    Inet6,
    /// Hardware (MAC) address.
    Link,
    Packet,
}

impl AddressFamily {
    pub fn is_link_layer(self) -> bool {
        matches!(self, AddressFamily::Link | AddressFamily::Packet)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkInterfaceAddress {
    pub interface: String,
    pub family: AddressFamily,
    pub address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatteryStatus {
    pub percent: f32,
    pub plugged_in: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FanReading {
    Percent(u32),
    NotSupported,
    Error(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct GpuFanEntry {
    pub index: u32,
    pub name: String,
    pub reading: FanReading,
}

/// Sensor channel exposed by the hardware management service.
#[derive(Debug, Clone, Serialize)]
pub struct SensorProbe {
    pub description: String,
    pub current_reading: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FanRecord {
    pub name: String,
    /// RPM the controller is aiming for, when it reports one.
    pub desired_speed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThermalZone {
    pub instance_name: String,
    pub active_cooling: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BaseboardRecord {
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub version: Option<String>,
    pub serial_number: Option<String>,
}
