//! Metric identity and per-tick readings

use serde::{Deserialize, Serialize};

/// Unit a metric value is expressed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Percent,
    Celsius,
    Bytes,
}

/// The six metrics shown by the panel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    CpuLoad,
    CpuTemp,
    Ram,
    Swap,
    GpuTemp,
    Disk,
}

impl MetricKind {
    /// Panel order
    pub const ALL: [MetricKind; 6] = [
        MetricKind::CpuLoad,
        MetricKind::CpuTemp,
        MetricKind::Ram,
        MetricKind::Swap,
        MetricKind::GpuTemp,
        MetricKind::Disk,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            MetricKind::CpuLoad => "cpu_load",
            MetricKind::CpuTemp => "cpu_temp",
            MetricKind::Ram => "ram",
            MetricKind::Swap => "swap",
            MetricKind::GpuTemp => "gpu_temp",
            MetricKind::Disk => "disk",
        }
    }

    /// Short caption used by the panel
    pub fn caption(&self) -> &'static str {
        match self {
            MetricKind::CpuLoad => "CPU",
            MetricKind::CpuTemp => "TEMP",
            MetricKind::Ram => "RAM",
            MetricKind::Swap => "SWAP",
            MetricKind::GpuTemp => "GPU",
            MetricKind::Disk => "DISK",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            MetricKind::CpuTemp | MetricKind::GpuTemp => Unit::Celsius,
            MetricKind::CpuLoad | MetricKind::Ram | MetricKind::Swap | MetricKind::Disk => {
                Unit::Percent
            }
        }
    }

    pub fn is_temperature(&self) -> bool {
        self.unit() == Unit::Celsius
    }
}

/// One sampled metric. Recreated every tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Metric {
    pub kind: MetricKind,
    /// `None` when no acquisition strategy succeeded
    pub value: Option<f64>,
    pub unit: Unit,
    /// Bytes in use, only reported for RAM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_bytes: Option<u64>,
}

impl Metric {
    pub fn new(kind: MetricKind, value: Option<f64>) -> Self {
        Self {
            kind,
            value,
            unit: kind.unit(),
            used_bytes: None,
        }
    }

    pub fn unavailable(kind: MetricKind) -> Self {
        Self::new(kind, None)
    }

    pub fn with_used_bytes(mut self, used_bytes: u64) -> Self {
        self.used_bytes = Some(used_bytes);
        self
    }

    pub fn is_available(&self) -> bool {
        self.value.is_some()
    }
}
