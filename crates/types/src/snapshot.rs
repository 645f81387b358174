//! Raw readings returned by system probes and sensor providers

use serde::{Deserialize, Serialize};

/// A single temperature reading inside a sensor group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorReading {
    pub label: String,
    /// Current temperature in degrees Celsius
    pub current: f64,
}

impl SensorReading {
    pub fn new(label: impl Into<String>, current: f64) -> Self {
        Self {
            label: label.into(),
            current,
        }
    }
}

/// Readings reported by one hardware sensor chip (e.g. `coretemp`, `amdgpu`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorGroup {
    pub name: String,
    pub readings: Vec<SensorReading>,
}

impl SensorGroup {
    pub fn new(name: impl Into<String>, readings: Vec<SensorReading>) -> Self {
        Self {
            name: name.into(),
            readings,
        }
    }
}

/// Used/total pair for memory, swap and filesystems (bytes)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UsageSnapshot {
    pub total: u64,
    pub used: u64,
}

impl UsageSnapshot {
    pub fn new(total: u64, used: u64) -> Self {
        Self { total, used }
    }

    /// Percent used; an empty device (e.g. no swap configured) reports 0
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.used as f64 / self.total as f64 * 100.0
        }
    }
}
