//! Shared temperature sensor components cache
//!
//! This module provides a single global instance of sysinfo::Components that is
//! initialized once and shared by the CPU and GPU temperature chains. Sensor
//! discovery is expensive, so it happens exactly once per process.

use anyhow::Result;
use cyber_monitor_core::{SensorProvider, SENSOR_REFRESH_INTERVAL};
use cyber_monitor_types::{SensorGroup, SensorReading};
use once_cell::sync::Lazy;
use std::sync::Mutex;
use std::time::Instant;
use sysinfo::Components;

/// Shared components with refresh timestamp
struct SharedSensors {
    components: Components,
    last_refresh: Instant,
}

impl SharedSensors {
    fn new() -> Self {
        Self {
            components: Components::new_with_refreshed_list(),
            last_refresh: Instant::now(),
        }
    }

    /// Refresh only if enough time has passed since last refresh
    fn refresh_if_needed(&mut self) {
        if self.last_refresh.elapsed() >= SENSOR_REFRESH_INTERVAL {
            self.components.refresh();
            self.last_refresh = Instant::now();
        }
    }
}

static SHARED_COMPONENTS: Lazy<Mutex<SharedSensors>> = Lazy::new(|| {
    log::info!("Initializing shared temperature sensors");
    let sensors = SharedSensors::new();
    log::info!("Shared temperature sensors initialized: {} components", sensors.components.len());
    Mutex::new(sensors)
});

/// Force sensor discovery up front so the first tick is not delayed by it
pub fn initialize() {
    let _ = &*SHARED_COMPONENTS;
}

/// Split a sysinfo component label into (chip, sensor label).
///
/// On Linux sysinfo reports hwmon sensors as `"<chip> <label>"`, e.g.
/// `"coretemp Package id 0"` or `"amdgpu edge"`. Chips without per-sensor
/// labels are reported by chip name alone.
pub fn split_component_label(label: &str) -> (&str, &str) {
    let label = label.trim();
    match label.split_once(char::is_whitespace) {
        Some((chip, rest)) => (chip, rest.trim_start()),
        None => (label, label),
    }
}

/// Group flat (label, temperature) pairs by chip, keeping discovery order
pub fn group_readings<'a>(temps: impl IntoIterator<Item = (&'a str, f32)>) -> Vec<SensorGroup> {
    let mut groups: Vec<SensorGroup> = Vec::new();
    for (label, temp) in temps {
        let (chip, sensor) = split_component_label(label);
        let reading = SensorReading::new(sensor, temp as f64);
        match groups.iter_mut().find(|g| g.name == chip) {
            Some(group) => group.readings.push(reading),
            None => groups.push(SensorGroup::new(chip, vec![reading])),
        }
    }
    groups
}

/// [`SensorProvider`] backed by the shared sysinfo components
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoSensors;

impl SysinfoSensors {
    pub fn new() -> Self {
        Self
    }
}

impl SensorProvider for SysinfoSensors {
    fn readings(&self) -> Result<Vec<SensorGroup>> {
        // Recover from a poisoned mutex; the component list is still usable
        let mut sensors = SHARED_COMPONENTS.lock().unwrap_or_else(|poisoned| {
            log::warn!("Shared sensors mutex was poisoned, recovering");
            poisoned.into_inner()
        });
        sensors.refresh_if_needed();
        Ok(group_readings(
            sensors.components.iter().map(|c| (c.label(), c.temperature())),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_component_label() {
        assert_eq!(split_component_label("coretemp Package id 0"), ("coretemp", "Package id 0"));
        assert_eq!(split_component_label("k10temp Tctl"), ("k10temp", "Tctl"));
        assert_eq!(split_component_label("acpitz"), ("acpitz", "acpitz"));
        assert_eq!(split_component_label("  amdgpu   edge "), ("amdgpu", "edge"));
    }

    #[test]
    fn test_group_readings_keeps_order() {
        let groups = group_readings(vec![
            ("nvme Composite", 38.0),
            ("coretemp Package id 0", 55.0),
            ("coretemp Core 0", 53.0),
            ("nvme Sensor 1", 39.0),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "nvme");
        assert_eq!(groups[0].readings.len(), 2);
        assert_eq!(groups[1].name, "coretemp");
        assert_eq!(groups[1].readings[0], SensorReading::new("Package id 0", 55.0));
        assert_eq!(groups[1].readings[1].label, "Core 0");
    }
}
