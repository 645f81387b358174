//! Ordered fallback strategies for temperature metrics
//!
//! A [`StrategyChain`] holds acquisition methods in priority order. Each
//! strategy either yields a finite reading or fails; failures are logged at
//! debug level and the next strategy is tried. Structured sensor readings are
//! fetched at most once per chain evaluation and shared by every
//! sensor-backed strategy in it.

use crate::command::run_bounded;
use cyber_monitor_core::SensorProvider;
use cyber_monitor_types::{MetricKind, SensorGroup};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

/// Turns a tool's stdout into a reading
pub type OutputParser = fn(&str) -> Option<f64>;

/// Case-insensitive substring match on sensor group names and labels
#[derive(Debug, Clone, PartialEq)]
pub struct SensorMatch {
    groups: Vec<String>,
    labels: Vec<String>,
}

impl SensorMatch {
    pub fn new(groups: &[&str], labels: &[&str]) -> Self {
        Self {
            groups: groups.iter().map(|g| g.to_lowercase()).collect(),
            labels: labels.iter().map(|l| l.to_lowercase()).collect(),
        }
    }

    /// CPU package sensors: Intel `coretemp`, AMD `k10temp`
    pub fn cpu_package() -> Self {
        Self::new(&["coretemp", "k10temp", "cpu"], &["tctl", "package"])
    }

    /// GPU die sensors from the amdgpu and nvidia drivers
    pub fn gpu_edge() -> Self {
        Self::new(&["amdgpu", "nvidia"], &["edge", "temp"])
    }

    /// First reading whose group and label both match
    pub fn find(&self, groups: &[SensorGroup]) -> Option<f64> {
        groups
            .iter()
            .filter(|group| contains_any(&group.name, &self.groups))
            .flat_map(|group| group.readings.iter())
            .find(|reading| reading.current.is_finite() && contains_any(&reading.label, &self.labels))
            .map(|reading| reading.current)
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

/// First usable reading of the first group that has one
pub fn first_reading(groups: &[SensorGroup]) -> Option<f64> {
    groups
        .iter()
        .flat_map(|group| group.readings.iter())
        .map(|reading| reading.current)
        .find(|current| current.is_finite())
}

/// External tool invocation plus output parser
#[derive(Debug, Clone)]
pub struct CommandStrategy {
    pub program: String,
    pub args: Vec<String>,
    pub parser: OutputParser,
}

impl CommandStrategy {
    pub fn new(program: impl Into<String>, args: &[&str], parser: OutputParser) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            parser,
        }
    }

    /// lm-sensors text dump
    pub fn lm_sensors() -> Self {
        Self::new("sensors", &[], parse_sensors_output)
    }

    /// NVIDIA vendor query tool
    pub fn nvidia_smi() -> Self {
        Self::new(
            "nvidia-smi",
            &["--query-gpu=temperature.gpu", "--format=csv,noheader"],
            parse_single_value,
        )
    }

    pub async fn run(&self, timeout: Duration) -> Option<f64> {
        let stdout = run_bounded(&self.program, &self.args, timeout).await?;
        let value = (self.parser)(&stdout);
        if value.is_none() {
            log::debug!("Could not parse output of `{}`: {:?}", self.program, stdout.trim());
        }
        value
    }
}

/// Extract the CPU package temperature from `sensors` output.
///
/// Looks at lines mentioning `Tctl` (AMD) or `Package id 0` (Intel) and takes
/// the first whitespace-separated token that is a number once a leading `+`
/// and a trailing `°C` are stripped.
pub fn parse_sensors_output(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .filter(|line| line.contains("Tctl") || line.contains("Package id 0"))
        .find_map(|line| line.split_whitespace().find_map(parse_temperature_token))
}

fn parse_temperature_token(token: &str) -> Option<f64> {
    token
        .trim_start_matches('+')
        .trim_end_matches("°C")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// A single number on the first non-empty line (`csv,noheader` output)
pub fn parse_single_value(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())?
        .parse::<f64>()
        .ok()
}

/// One acquisition method
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Structured readings filtered by group and label
    LabeledSensor(SensorMatch),
    /// First structured reading from any group
    AnySensor,
    /// External command-line tool
    Command(CommandStrategy),
    /// NVIDIA Management Library, device 0
    #[cfg(feature = "nvidia")]
    Nvml,
}

impl Strategy {
    pub fn describe(&self) -> String {
        match self {
            Strategy::LabeledSensor(m) => format!("sensors[{}]", m.groups.join("|")),
            Strategy::AnySensor => "sensors[any]".to_string(),
            Strategy::Command(cmd) => format!("`{}`", cmd.program),
            #[cfg(feature = "nvidia")]
            Strategy::Nvml => "nvml".to_string(),
        }
    }

    fn uses_sensors(&self) -> bool {
        matches!(self, Strategy::LabeledSensor(_) | Strategy::AnySensor)
    }
}

/// Strategies for one metric, in fallback order
#[derive(Debug, Clone)]
pub struct StrategyChain {
    metric: MetricKind,
    strategies: Vec<Strategy>,
}

impl StrategyChain {
    pub fn new(metric: MetricKind, strategies: Vec<Strategy>) -> Self {
        Self { metric, strategies }
    }

    /// Labeled package sensor, any sensor, then `sensors`
    pub fn cpu_temperature() -> Self {
        Self::new(
            MetricKind::CpuTemp,
            vec![
                Strategy::LabeledSensor(SensorMatch::cpu_package()),
                Strategy::AnySensor,
                Strategy::Command(CommandStrategy::lm_sensors()),
            ],
        )
    }

    /// GPU driver sensor, NVML when compiled in, then `nvidia-smi`
    pub fn gpu_temperature() -> Self {
        let mut strategies = vec![Strategy::LabeledSensor(SensorMatch::gpu_edge())];
        #[cfg(feature = "nvidia")]
        strategies.push(Strategy::Nvml);
        strategies.push(Strategy::Command(CommandStrategy::nvidia_smi()));
        Self::new(MetricKind::GpuTemp, strategies)
    }

    /// Try every strategy in order; `None` when all of them fail
    pub async fn acquire(&self, sensors: &dyn SensorProvider, timeout: Duration) -> Option<f64> {
        let mut readings: Option<Vec<SensorGroup>> = None;

        for strategy in &self.strategies {
            if strategy.uses_sensors() && readings.is_none() {
                readings = Some(fetch_readings(sensors));
            }
            let groups = readings.as_deref().unwrap_or_default();

            let value = match strategy {
                Strategy::LabeledSensor(m) => m.find(groups),
                Strategy::AnySensor => first_reading(groups),
                Strategy::Command(cmd) => cmd.run(timeout).await,
                #[cfg(feature = "nvidia")]
                Strategy::Nvml => crate::nvml::gpu_temperature(),
            };

            match value.filter(|v| v.is_finite()) {
                Some(v) => {
                    log::trace!("{}: {:.1} via {}", self.metric.id(), v, strategy.describe());
                    return Some(v);
                }
                None => log::debug!("{}: {} yielded nothing", self.metric.id(), strategy.describe()),
            }
        }

        None
    }
}

/// Query the provider, treating errors and panics as "no data"
fn fetch_readings(sensors: &dyn SensorProvider) -> Vec<SensorGroup> {
    match catch_unwind(AssertUnwindSafe(|| sensors.readings())) {
        Ok(Ok(groups)) => groups,
        Ok(Err(e)) => {
            log::debug!("Sensor provider failed: {}", e);
            Vec::new()
        }
        Err(_) => {
            log::error!("Sensor provider panicked");
            Vec::new()
        }
    }
}
