use nvml_wrapper::error::NvmlError;
use nvml_wrapper::Nvml;
use tracing::{debug, info};

use crate::error::CollectError;
use crate::hardware::sources::{Capability, GpuLibrary, GpuSession};

/// NVIDIA management library. Each `open` is a fresh init/shutdown cycle.
pub struct NvmlLibrary;

/// Live NVML handle; dropping it shuts the library down.
pub struct NvmlSession {
    nvml: Nvml,
}

impl GpuLibrary for NvmlLibrary {
    fn open(&self) -> Result<Box<dyn GpuSession + '_>, CollectError> {
        let nvml = Nvml::init().map_err(nvml_error)?;
        Ok(Box::new(NvmlSession { nvml }))
    }
}

impl GpuSession for NvmlSession {
    fn device_count(&self) -> Result<u32, CollectError> {
        self.nvml.device_count().map_err(nvml_error)
    }

    fn device_name(&self, index: u32) -> Result<String, CollectError> {
        let device = self.nvml.device_by_index(index).map_err(nvml_error)?;
        device.name().map_err(nvml_error)
    }

    fn fan_speed(&self, index: u32) -> Result<u32, CollectError> {
        let device = self.nvml.device_by_index(index).map_err(nvml_error)?;
        device.fan_speed(0).map_err(nvml_error)
    }
}

fn nvml_error(e: NvmlError) -> CollectError {
    match e {
        NvmlError::NotSupported => CollectError::Unsupported("fan speed reading".to_string()),
        other => CollectError::query("NVML", other),
    }
}

/// Probes for the shared library once. A missing library makes the capability
/// absent; any other init failure is left for the GPU collector to report.
pub fn detect_gpu_library() -> Capability<Box<dyn GpuLibrary>> {
    match Nvml::init() {
        Ok(nvml) => {
            if let Ok(version) = nvml.sys_driver_version() {
                info!(driver = %version, "NVML available");
            }
            Capability::Available(Box::new(NvmlLibrary))
        }
        Err(e @ NvmlError::LibloadingError(_)) | Err(e @ NvmlError::LibraryNotFound) => {
            debug!(error = %e, "NVML library not found");
            Capability::Absent(e.to_string())
        }
        Err(e) => {
            debug!(error = %e, "NVML present but failed to initialize");
            Capability::Available(Box::new(NvmlLibrary))
        }
    }
}
