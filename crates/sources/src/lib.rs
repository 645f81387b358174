//! cyber-monitor-sources: Metric acquisition for the cyber-monitor panel.
//!
//! Temperatures come from ordered fallback chains (structured sensors, NVML,
//! command-line tools); load, memory and disk come from a [`SystemProbe`]
//! implementation. Nothing in here returns an error to the caller: a metric
//! that cannot be read is simply absent.
//!
//! [`SystemProbe`]: cyber_monitor_core::SystemProbe

mod command;
mod disk_cache;
mod metric_source;
#[cfg(feature = "nvidia")]
mod nvml;
mod shared_sensors;
mod strategy;
mod system;

pub use command::{run_bounded, try_run_bounded, CommandError};
pub use disk_cache::DiskCache;
pub use metric_source::{MetricSource, RamUsage, SourceSettings};
pub use shared_sensors::{group_readings, split_component_label, SysinfoSensors};
pub use strategy::{
    first_reading, parse_sensors_output, parse_single_value, CommandStrategy, OutputParser,
    SensorMatch, Strategy, StrategyChain,
};
pub use system::SysinfoProbe;

/// Initialize shared sensor caches (call once at startup)
pub fn initialize_sensors() {
    shared_sensors::initialize();
}
