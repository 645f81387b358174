//! Seams between metric acquisition and the operating system

use anyhow::Result;
use cyber_monitor_types::{SensorGroup, UsageSnapshot};
use std::path::Path;

/// Snapshot-style access to CPU, memory and filesystem counters
///
/// Implementations must not block: `cpu_load` reports utilization since the
/// previous call rather than sampling over an interval.
pub trait SystemProbe: Send {
    /// Global CPU utilization in percent (0-100)
    fn cpu_load(&mut self) -> Result<f64>;

    /// Physical memory usage
    fn memory(&mut self) -> Result<UsageSnapshot>;

    /// Swap usage; a system without swap reports a zero total
    fn swap(&mut self) -> Result<UsageSnapshot>;

    /// Usage of the filesystem mounted at `mount_point`
    fn disk(&mut self, mount_point: &Path) -> Result<UsageSnapshot>;
}

/// Structured hardware temperature readings grouped by sensor chip
///
/// An empty list and an error are both treated as "no data" by callers.
pub trait SensorProvider: Send + Sync {
    fn readings(&self) -> Result<Vec<SensorGroup>>;
}

/// Type-erased providers for dynamic dispatch
pub type BoxedSystemProbe = Box<dyn SystemProbe>;
pub type BoxedSensorProvider = Box<dyn SensorProvider>;
