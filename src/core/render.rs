//! Metric value to panel text and severity

use cyber_monitor_core::{memory_text, percent_text, temperature_text, UNAVAILABLE_TEXT};
use cyber_monitor_types::{Metric, MetricKind, Severity, SeverityThresholds, TemperatureScale};

/// Text and tier handed to the display sink
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub text: String,
    pub severity: Severity,
}

impl Rendered {
    pub fn unavailable() -> Self {
        Self {
            text: UNAVAILABLE_TEXT.to_string(),
            severity: Severity::Neutral,
        }
    }
}

/// Formatting and severity rules for every metric kind
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Renderer {
    pub percent_tiers: SeverityThresholds,
    pub temperature_scale: TemperatureScale,
}

impl Renderer {
    pub fn new(percent_tiers: SeverityThresholds, temperature_scale: TemperatureScale) -> Self {
        Self {
            percent_tiers,
            temperature_scale,
        }
    }

    pub fn severity(&self, kind: MetricKind, value: f64) -> Severity {
        if kind.is_temperature() {
            self.temperature_scale.classify(value, &self.percent_tiers)
        } else {
            self.percent_tiers.classify(value)
        }
    }

    pub fn render(&self, metric: &Metric) -> Rendered {
        let Some(value) = metric.value else {
            return Rendered::unavailable();
        };

        let text = match metric.kind {
            MetricKind::CpuTemp | MetricKind::GpuTemp => temperature_text(value),
            MetricKind::Ram => match metric.used_bytes {
                Some(used) => memory_text(value, used),
                None => percent_text(value),
            },
            MetricKind::CpuLoad | MetricKind::Swap | MetricKind::Disk => percent_text(value),
        };

        Rendered {
            text,
            severity: self.severity(metric.kind, value),
        }
    }
}
