//! Configuration management

mod settings;

pub use settings::{ConfigError, MonitorConfig, OutputFormat};
