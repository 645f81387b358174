//! cyber-monitor-types: Shared data types for the cyber-monitor panel.
//!
//! This crate contains pure data types (metrics, severity tiers, colors and
//! raw probe readings) shared by every other crate in the workspace. Nothing
//! here performs I/O.

pub mod color;
pub mod metric;
pub mod severity;
pub mod snapshot;

// Re-export commonly used types at the crate root for convenience
pub use color::{Color, Palette};
pub use metric::{Metric, MetricKind, Unit};
pub use severity::{Severity, SeverityThresholds, TemperatureScale};
pub use snapshot::{SensorGroup, SensorReading, UsageSnapshot};
