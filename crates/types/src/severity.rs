//! Severity tiers for percentage-like values.

use serde::{Deserialize, Serialize};

/// Display tier of a metric value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Metric unavailable
    #[default]
    Neutral,
    Normal,
    Warning,
    Danger,
}

/// Lower bounds of the warning and danger tiers (inclusive)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeverityThresholds {
    pub warning: f64,
    pub danger: f64,
}

impl SeverityThresholds {
    pub const fn new(warning: f64, danger: f64) -> Self {
        Self { warning, danger }
    }

    pub fn classify(&self, value: f64) -> Severity {
        if !value.is_finite() {
            Severity::Neutral
        } else if value < self.warning {
            Severity::Normal
        } else if value < self.danger {
            Severity::Warning
        } else {
            Severity::Danger
        }
    }
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self::new(50.0, 75.0)
    }
}

/// How temperatures are mapped onto severity tiers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TemperatureScale {
    /// Temperature expressed as a percentage of 100°C and classified with
    /// the percent tiers. This is a calibration choice, not a hardware limit.
    #[default]
    #[serde(rename = "percent_of_100c")]
    PercentOf100C,
    /// Explicit thresholds in degrees Celsius
    Celsius(SeverityThresholds),
}

impl TemperatureScale {
    pub fn classify(&self, celsius: f64, percent_tiers: &SeverityThresholds) -> Severity {
        match self {
            TemperatureScale::PercentOf100C => percent_tiers.classify(celsius / 100.0 * 100.0),
            TemperatureScale::Celsius(thresholds) => thresholds.classify(celsius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_percent(percent: f64) -> Severity {
        SeverityThresholds::default().classify(percent)
    }

    #[test]
    fn test_percent_tiers() {
        assert_eq!(from_percent(0.0), Severity::Normal);
        assert_eq!(from_percent(49.99), Severity::Normal);
        assert_eq!(from_percent(50.0), Severity::Warning);
        assert_eq!(from_percent(74.9), Severity::Warning);
        assert_eq!(from_percent(75.0), Severity::Danger);
        assert_eq!(from_percent(100.0), Severity::Danger);
    }

    #[test]
    fn test_every_percent_lands_in_one_tier() {
        for tenth in 0..=1000 {
            let p = tenth as f64 / 10.0;
            let expected = if p < 50.0 {
                Severity::Normal
            } else if p < 75.0 {
                Severity::Warning
            } else {
                Severity::Danger
            };
            assert_eq!(from_percent(p), expected, "p = {}", p);
        }
    }

    #[test]
    fn test_non_finite_is_neutral() {
        assert_eq!(from_percent(f64::NAN), Severity::Neutral);
        assert_eq!(from_percent(f64::INFINITY), Severity::Neutral);
    }

    #[test]
    fn test_temperature_compat_scale() {
        let tiers = SeverityThresholds::default();
        let scale = TemperatureScale::PercentOf100C;
        assert_eq!(scale.classify(62.3, &tiers), Severity::Warning);
        assert_eq!(scale.classify(49.0, &tiers), Severity::Normal);
        assert_eq!(scale.classify(50.0, &tiers), Severity::Warning);
        assert_eq!(scale.classify(75.0, &tiers), Severity::Danger);
        assert_eq!(scale.classify(91.0, &tiers), Severity::Danger);
    }

    #[test]
    fn test_temperature_celsius_scale() {
        let tiers = SeverityThresholds::default();
        let scale = TemperatureScale::Celsius(SeverityThresholds::new(70.0, 90.0));
        assert_eq!(scale.classify(62.3, &tiers), Severity::Normal);
        assert_eq!(scale.classify(70.0, &tiers), Severity::Warning);
        assert_eq!(scale.classify(95.0, &tiers), Severity::Danger);
    }

    #[test]
    fn test_scale_serialization() {
        let json = serde_json::to_string(&TemperatureScale::PercentOf100C).unwrap();
        assert_eq!(json, r#"{"mode":"percent_of_100c"}"#);

        let scale = TemperatureScale::Celsius(SeverityThresholds::new(60.0, 80.0));
        let json = serde_json::to_string(&scale).unwrap();
        let back: TemperatureScale = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scale);
    }
}
