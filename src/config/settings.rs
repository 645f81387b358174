//! Runtime configuration
//!
//! Everything is set from the command line; there is no configuration file.

use crate::core::Renderer;
use clap::ValueEnum;
use cyber_monitor_core::{COMMAND_TIMEOUT, DEFAULT_DISK_PATH, DISK_CACHE_TTL, TICK_INTERVAL};
use cyber_monitor_sources::SourceSettings;
use cyber_monitor_types::{SeverityThresholds, TemperatureScale};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Where ticks are rendered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Colored panel redrawn in place
    #[default]
    Text,
    /// One JSON object per tick
    Json,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("update interval must be greater than zero")]
    ZeroInterval,
    #[error("command timeout must be greater than zero")]
    ZeroTimeout,
    #[error("temperature thresholds must satisfy warning < danger (got {warning} and {danger})")]
    InvalidThresholds { warning: f64, danger: f64 },
    #[error("disk path must be absolute: {0}")]
    RelativeDiskPath(PathBuf),
}

/// Monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorConfig {
    /// Delay between ticks
    #[serde(default = "default_update_interval")]
    pub update_interval_ms: u64,
    /// Mount point reported as DISK
    #[serde(default = "default_disk_path")]
    pub disk_path: PathBuf,
    #[serde(default = "default_disk_cache_ms")]
    pub disk_cache_ms: u64,
    /// Bound for each external tool invocation
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
    #[serde(default)]
    pub output: OutputFormat,
    #[serde(default = "default_color")]
    pub color: bool,
    #[serde(default)]
    pub temperature_scale: TemperatureScale,
}

fn default_update_interval() -> u64 {
    TICK_INTERVAL.as_millis() as u64
}

fn default_disk_path() -> PathBuf {
    PathBuf::from(DEFAULT_DISK_PATH)
}

fn default_disk_cache_ms() -> u64 {
    DISK_CACHE_TTL.as_millis() as u64
}

fn default_command_timeout_ms() -> u64 {
    COMMAND_TIMEOUT.as_millis() as u64
}

fn default_color() -> bool {
    true
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval(),
            disk_path: default_disk_path(),
            disk_cache_ms: default_disk_cache_ms(),
            command_timeout_ms: default_command_timeout_ms(),
            output: OutputFormat::default(),
            color: default_color(),
            temperature_scale: TemperatureScale::default(),
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.command_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if let TemperatureScale::Celsius(t) = self.temperature_scale {
            if !(t.warning.is_finite() && t.danger.is_finite() && t.warning < t.danger) {
                return Err(ConfigError::InvalidThresholds {
                    warning: t.warning,
                    danger: t.danger,
                });
            }
        }
        if !self.disk_path.is_absolute() {
            return Err(ConfigError::RelativeDiskPath(self.disk_path.clone()));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    pub fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            disk_path: self.disk_path.clone(),
            disk_cache_ttl: Duration::from_millis(self.disk_cache_ms),
            command_timeout: Duration::from_millis(self.command_timeout_ms),
        }
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(SeverityThresholds::default(), self.temperature_scale)
    }
}
