//! Best-effort acquisition of every panel metric
//!
//! `MetricSource` never lets an acquisition failure escape: probe errors,
//! provider errors, missing tools and even panics inside a probe end up as
//! an absent value and a debug log line.

use crate::disk_cache::DiskCache;
use crate::shared_sensors::SysinfoSensors;
use crate::strategy::StrategyChain;
use crate::system::SysinfoProbe;
use anyhow::{anyhow, Result};
use cyber_monitor_core::{
    BoxedSensorProvider, BoxedSystemProbe, SensorProvider, SystemProbe, COMMAND_TIMEOUT,
    DEFAULT_DISK_PATH, DISK_CACHE_TTL,
};
use cyber_monitor_types::{Metric, MetricKind};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Knobs for metric acquisition
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings {
    /// Mount point reported as DISK
    pub disk_path: PathBuf,
    pub disk_cache_ttl: Duration,
    /// Bound for every external tool invocation
    pub command_timeout: Duration,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            disk_path: PathBuf::from(DEFAULT_DISK_PATH),
            disk_cache_ttl: DISK_CACHE_TTL,
            command_timeout: COMMAND_TIMEOUT,
        }
    }
}

/// Physical memory reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RamUsage {
    pub percent: f64,
    pub used_bytes: u64,
}

pub struct MetricSource {
    probe: BoxedSystemProbe,
    sensors: BoxedSensorProvider,
    cpu_chain: StrategyChain,
    gpu_chain: StrategyChain,
    disk_cache: DiskCache,
    settings: SourceSettings,
}

impl MetricSource {
    pub fn new(
        probe: impl SystemProbe + 'static,
        sensors: impl SensorProvider + 'static,
        settings: SourceSettings,
    ) -> Self {
        Self {
            probe: Box::new(probe),
            sensors: Box::new(sensors),
            cpu_chain: StrategyChain::cpu_temperature(),
            gpu_chain: StrategyChain::gpu_temperature(),
            disk_cache: DiskCache::new(settings.disk_cache_ttl),
            settings,
        }
    }

    /// Source reading the local machine through sysinfo and the usual tools
    pub fn system(settings: SourceSettings) -> Self {
        Self::new(SysinfoProbe::new(), SysinfoSensors::new(), settings)
    }

    pub fn with_cpu_chain(mut self, chain: StrategyChain) -> Self {
        self.cpu_chain = chain;
        self
    }

    pub fn with_gpu_chain(mut self, chain: StrategyChain) -> Self {
        self.gpu_chain = chain;
        self
    }

    /// Global CPU utilization since the previous call (0-100)
    pub fn cpu_load(&mut self) -> Option<f64> {
        guarded("cpu_load", || self.probe.cpu_load())
            .map(|load| load.clamp(0.0, 100.0))
            .filter(|load| load.is_finite())
    }

    pub async fn cpu_temperature(&self) -> Option<f64> {
        self.cpu_chain
            .acquire(self.sensors.as_ref(), self.settings.command_timeout)
            .await
    }

    pub async fn gpu_temperature(&self) -> Option<f64> {
        self.gpu_chain
            .acquire(self.sensors.as_ref(), self.settings.command_timeout)
            .await
    }

    pub fn ram_usage(&mut self) -> Option<RamUsage> {
        guarded("ram", || self.probe.memory()).map(|memory| RamUsage {
            percent: memory.percent(),
            used_bytes: memory.used,
        })
    }

    pub fn swap_usage(&mut self) -> Option<f64> {
        guarded("swap", || self.probe.swap()).map(|swap| swap.percent())
    }

    /// Percent used of the configured mount, cached for `disk_cache_ttl`
    pub fn disk_usage(&mut self, now: Instant) -> Option<f64> {
        let probe = &mut self.probe;
        let path = &self.settings.disk_path;
        self.disk_cache.get_or_refresh(now, || {
            catch_unwind(AssertUnwindSafe(|| probe.disk(path)))
                .unwrap_or_else(|_| Err(anyhow!("disk probe panicked")))
                .map(|usage| usage.percent())
        })
    }

    /// Acquire one metric
    pub async fn acquire(&mut self, kind: MetricKind, now: Instant) -> Metric {
        match kind {
            MetricKind::CpuLoad => Metric::new(kind, self.cpu_load()),
            MetricKind::CpuTemp => Metric::new(kind, self.cpu_temperature().await),
            MetricKind::Ram => match self.ram_usage() {
                Some(ram) => Metric::new(kind, Some(ram.percent)).with_used_bytes(ram.used_bytes),
                None => Metric::unavailable(kind),
            },
            MetricKind::Swap => Metric::new(kind, self.swap_usage()),
            MetricKind::GpuTemp => Metric::new(kind, self.gpu_temperature().await),
            MetricKind::Disk => Metric::new(kind, self.disk_usage(now)),
        }
    }

    /// All six metrics in panel order
    pub async fn snapshot(&mut self, now: Instant) -> Vec<Metric> {
        let mut metrics = Vec::with_capacity(MetricKind::ALL.len());
        for kind in MetricKind::ALL {
            metrics.push(self.acquire(kind, now).await);
        }
        metrics
    }
}

/// Run a probe call, turning errors and panics into `None`
fn guarded<T>(what: &str, f: impl FnOnce() -> Result<T>) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            log::debug!("{} unavailable: {}", what, e);
            None
        }
        Err(_) => {
            log::error!("{} probe panicked", what);
            None
        }
    }
}
