//! NVIDIA GPU temperature through NVML

use nvml_wrapper::enum_wrappers::device::TemperatureSensor;
use nvml_wrapper::Nvml;
use once_cell::sync::Lazy;

/// NVML is loaded once; machines without the driver library get `None`
static NVML: Lazy<Option<Nvml>> = Lazy::new(|| match Nvml::init() {
    Ok(nvml) => {
        log::info!("NVML initialized");
        Some(nvml)
    }
    Err(e) => {
        log::info!("NVML: Not available ({})", e);
        None
    }
});

/// Temperature of GPU 0 in degrees Celsius
pub fn gpu_temperature() -> Option<f64> {
    let nvml = NVML.as_ref()?;
    let device = match nvml.device_by_index(0) {
        Ok(device) => device,
        Err(e) => {
            log::debug!("NVML: no device 0 ({})", e);
            return None;
        }
    };
    device
        .temperature(TemperatureSensor::Gpu)
        .map(|t| t as f64)
        .map_err(|e| log::debug!("NVML: temperature query failed ({})", e))
        .ok()
}
