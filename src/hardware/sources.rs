// Capability traits the collectors read from. Real implementations live in
// hardware::platform; tests swap in in-memory fakes.
use std::time::Duration;

use crate::error::CollectError;
use crate::hardware::types::{
    BaseboardRecord, BatteryStatus, CpuSnapshot, DiskEntry, FanRecord, MemorySnapshot,
    NetworkInterfaceAddress, SensorProbe, SystemIdentity, ThermalZone,
};

/// An optional data source, resolved once at startup.
pub enum Capability<T> {
    Available(T),
    Absent(String),
}

impl<T> Capability<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            Capability::Available(inner) => Some(inner),
            Capability::Absent(_) => None,
        }
    }

    /// The source, or `CapabilityAbsent` carrying the detection reason.
    pub fn require(&self) -> Result<&T, CollectError> {
        match self {
            Capability::Available(inner) => Ok(inner),
            Capability::Absent(reason) => Err(CollectError::CapabilityAbsent(reason.clone())),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }
}

pub trait SystemSource {
    fn identity(&self) -> Result<SystemIdentity, CollectError>;

    /// Blocks for `window` to measure utilization.
    fn cpu(&self, window: Duration) -> Result<CpuSnapshot, CollectError>;

    fn memory(&self) -> Result<MemorySnapshot, CollectError>;

    fn gpu_temperature(&self) -> Option<f32>;
}

pub trait VolumeSource {
    /// Every mounted volume; the disk collector keeps the local fixed ones.
    fn volumes(&self) -> Result<Vec<DiskEntry>, CollectError>;
}

pub trait InterfaceSource {
    /// Every bound address, in the platform's enumeration order.
    fn addresses(&self) -> Result<Vec<NetworkInterfaceAddress>, CollectError>;
}

pub trait BatterySource {
    /// `Ok(None)` when the machine has no battery.
    fn battery(&self) -> Result<Option<BatteryStatus>, CollectError>;
}

/// Vendor GPU management library.
pub trait GpuLibrary {
    /// Initializes the library. Dropping the session releases it.
    fn open(&self) -> Result<Box<dyn GpuSession + '_>, CollectError>;
}

pub trait GpuSession {
    fn device_count(&self) -> Result<u32, CollectError>;
    fn device_name(&self, index: u32) -> Result<String, CollectError>;
    /// Fails with `CollectError::Unsupported` when the device has no readable fan.
    fn fan_speed(&self, index: u32) -> Result<u32, CollectError>;
}

/// Platform hardware-management service.
pub trait ManagementService {
    fn sensor_probes(&self) -> Result<Vec<SensorProbe>, CollectError>;
    fn fans(&self) -> Result<Vec<FanRecord>, CollectError>;
    fn thermal_zones(&self) -> Result<Vec<ThermalZone>, CollectError>;
    fn baseboards(&self) -> Result<Vec<BaseboardRecord>, CollectError>;
}

/// Everything the report builder reads from.
pub struct Capabilities {
    pub system: Box<dyn SystemSource>,
    pub volumes: Box<dyn VolumeSource>,
    pub interfaces: Box<dyn InterfaceSource>,
    pub battery: Capability<Box<dyn BatterySource>>,
    pub gpu: Capability<Box<dyn GpuLibrary>>,
    pub management: Capability<Box<dyn ManagementService>>,
    pub elevated: bool,
}
