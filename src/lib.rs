//! cyber-monitor: a small always-on system telemetry panel for Linux
//!
//! This library wires the workspace together:
//! - `core`: the tick loop (`Sampler`) and per-metric rendering
//! - `sinks`: terminal and JSON-lines display sinks
//! - `config`: runtime configuration built from the command line
//!
//! Metric acquisition lives in `cyber-monitor-sources`, re-exported as
//! [`sources`].

pub mod config;
pub mod core;
pub mod sinks;

pub use cyber_monitor_sources as sources;
pub use cyber_monitor_types as types;

// Re-export commonly used types
pub use config::{ConfigError, MonitorConfig, OutputFormat};
pub use core::{Rendered, Renderer, Sampler, TickReport};
