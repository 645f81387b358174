//! cyber-monitor-core: Core traits and helpers for the cyber-monitor panel.
//!
//! This crate contains the seams (`SystemProbe`, `SensorProvider`,
//! `DisplaySink`), shared constants and the pure formatting helpers used to
//! turn metric values into panel text.

pub mod constants;
mod data_source;
mod displayer;
pub mod format;

pub use constants::{
    BAR_CELLS, BYTES_PER_GB, BYTES_PER_KB, COMMAND_TIMEOUT, CPU_PRIME_DELAY, DEFAULT_DISK_PATH,
    DISK_CACHE_TTL, SENSOR_REFRESH_INTERVAL, TICK_INTERVAL, UNAVAILABLE_TEXT,
};
pub use data_source::{BoxedSensorProvider, BoxedSystemProbe, SensorProvider, SystemProbe};
pub use displayer::{BoxedDisplaySink, DisplaySink};
pub use format::{align_value, bar, human_bytes, memory_text, percent_text, temperature_text};

// Re-export types used in trait signatures for convenience
pub use cyber_monitor_types::{Metric, MetricKind, SensorGroup, Severity, UsageSnapshot};
