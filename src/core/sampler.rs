//! Sampler: drives one metrics pass per tick on a fixed cadence

use super::Renderer;
use anyhow::{anyhow, Result};
use cyber_monitor_core::BoxedDisplaySink;
use cyber_monitor_sources::MetricSource;
use cyber_monitor_types::Metric;
use log::{error, trace};
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;
use tokio::time::Instant;

/// Outcome of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Metrics shown with a value
    pub shown: usize,
    /// Metrics shown as unavailable
    pub unavailable: usize,
    /// Metrics that could not be rendered or dispatched
    pub failed: usize,
}

/// Owns the metric source and the sink; runs passes one after another
pub struct Sampler {
    source: MetricSource,
    sink: BoxedDisplaySink,
    renderer: Renderer,
    interval: Duration,
    ticks: u64,
}

impl Sampler {
    pub fn new(
        source: MetricSource,
        sink: BoxedDisplaySink,
        renderer: Renderer,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            sink,
            renderer,
            interval,
            ticks: 0,
        }
    }

    /// Completed passes so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run passes until `shutdown` resolves
    ///
    /// The next pass starts `interval` after the previous one finished, so
    /// passes never overlap however long acquisition takes.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let start = Instant::now();
            let report = self.tick().await;
            trace!("Tick {} took {:?}: {:?}", self.ticks, start.elapsed(), report);

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    /// One full pass over every metric
    pub async fn tick(&mut self) -> TickReport {
        let now = Instant::now().into_std();
        let mut report = TickReport::default();

        if let Err(e) = self.sink.begin_tick() {
            error!("Display sink failed to start tick: {}", e);
        }

        for metric in self.source.snapshot(now).await {
            match self.dispatch(&metric) {
                Ok(()) if metric.is_available() => report.shown += 1,
                Ok(()) => report.unavailable += 1,
                Err(e) => {
                    error!("Error updating {}: {}", metric.kind.id(), e);
                    report.failed += 1;
                }
            }
        }

        if let Err(e) = self.sink.end_tick() {
            error!("Display sink failed to finish tick: {}", e);
        }

        self.ticks += 1;
        report
    }

    /// Render one metric and hand it to the sink
    fn dispatch(&mut self, metric: &Metric) -> Result<()> {
        let renderer = &self.renderer;
        let sink = &mut self.sink;
        catch_unwind(AssertUnwindSafe(|| {
            let rendered = renderer.render(metric);
            sink.show(metric, &rendered.text, rendered.severity)
        }))
        .unwrap_or_else(|_| Err(anyhow!("panicked while rendering {}", metric.kind.id())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyber_monitor_core::{DisplaySink, SensorProvider, SystemProbe};
    use cyber_monitor_sources::{SensorMatch, SourceSettings, Strategy, StrategyChain};
    use cyber_monitor_types::{MetricKind, SensorGroup, SensorReading, Severity, UsageSnapshot};
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Shown {
        kind: MetricKind,
        text: String,
        severity: Severity,
    }

    #[derive(Default)]
    struct Record {
        ticks: Vec<Vec<Shown>>,
        started_at: Vec<Instant>,
    }

    /// Sink that records everything; optionally refuses one metric
    struct RecordingSink {
        record: Arc<Mutex<Record>>,
        reject: Option<MetricKind>,
    }

    impl DisplaySink for RecordingSink {
        fn begin_tick(&mut self) -> Result<()> {
            let mut record = self.record.lock().unwrap();
            record.started_at.push(Instant::now());
            record.ticks.push(Vec::new());
            Ok(())
        }

        fn show(&mut self, metric: &Metric, text: &str, severity: Severity) -> Result<()> {
            if self.reject == Some(metric.kind) {
                return Err(anyhow!("widget for {} is gone", metric.kind.id()));
            }
            let mut record = self.record.lock().unwrap();
            record.ticks.last_mut().unwrap().push(Shown {
                kind: metric.kind,
                text: text.to_string(),
                severity,
            });
            Ok(())
        }
    }

    struct FakeProbe {
        fail_memory: bool,
    }

    impl SystemProbe for FakeProbe {
        fn cpu_load(&mut self) -> Result<f64> {
            Ok(12.0)
        }

        fn memory(&mut self) -> Result<UsageSnapshot> {
            if self.fail_memory {
                return Err(anyhow!("meminfo unreadable"));
            }
            Ok(UsageSnapshot::new(10 * 1024 * 1024 * 1024, 8 * 1024 * 1024 * 1024))
        }

        fn swap(&mut self) -> Result<UsageSnapshot> {
            Ok(UsageSnapshot::new(1000, 500))
        }

        fn disk(&mut self, _mount_point: &Path) -> Result<UsageSnapshot> {
            Ok(UsageSnapshot::new(1000, 800))
        }
    }

    struct FixedSensors;

    impl SensorProvider for FixedSensors {
        fn readings(&self) -> Result<Vec<SensorGroup>> {
            Ok(vec![SensorGroup::new(
                "coretemp",
                vec![SensorReading::new("Package id 0", 62.3)],
            )])
        }
    }

    fn sampler(fail_memory: bool, reject: Option<MetricKind>) -> (Sampler, Arc<Mutex<Record>>) {
        let record = Arc::new(Mutex::new(Record::default()));
        let probe = FakeProbe { fail_memory };
        let source = MetricSource::new(probe, FixedSensors, SourceSettings::default())
            .with_cpu_chain(StrategyChain::new(
                MetricKind::CpuTemp,
                vec![Strategy::LabeledSensor(SensorMatch::cpu_package())],
            ))
            .with_gpu_chain(StrategyChain::new(
                MetricKind::GpuTemp,
                vec![Strategy::LabeledSensor(SensorMatch::gpu_edge())],
            ));
        let sink = RecordingSink {
            record: record.clone(),
            reject,
        };
        let sampler = Sampler::new(
            source,
            Box::new(sink),
            Renderer::default(),
            Duration::from_millis(1500),
        );
        (sampler, record)
    }

    fn shown(kind: MetricKind, text: &str, severity: Severity) -> Shown {
        Shown {
            kind,
            text: text.to_string(),
            severity,
        }
    }

    #[tokio::test]
    async fn test_tick_renders_every_metric() {
        let (mut sampler, record) = sampler(false, None);
        let report = sampler.tick().await;

        assert_eq!(
            report,
            TickReport {
                shown: 5,
                unavailable: 1,
                failed: 0
            }
        );
        let record = record.lock().unwrap();
        assert_eq!(
            record.ticks[0],
            vec![
                shown(MetricKind::CpuLoad, "12.0% [█░░░░░░░░░]", Severity::Normal),
                shown(MetricKind::CpuTemp, "62.3°C", Severity::Warning),
                shown(MetricKind::Ram, "80.0% [████████░░] 8.0GB", Severity::Danger),
                shown(MetricKind::Swap, "50.0% [█████░░░░░]", Severity::Warning),
                shown(MetricKind::GpuTemp, "N/A", Severity::Neutral),
                shown(MetricKind::Disk, "80.0% [████████░░]", Severity::Danger),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_acquisition_does_not_stop_tick() {
        let (mut sampler, record) = sampler(true, None);
        let report = sampler.tick().await;

        assert_eq!(report.unavailable, 2);
        let record = record.lock().unwrap();
        let tick = &record.ticks[0];
        assert_eq!(tick.len(), 6);
        assert_eq!(tick[2], shown(MetricKind::Ram, "N/A", Severity::Neutral));
        assert_eq!(tick[3], shown(MetricKind::Swap, "50.0% [█████░░░░░]", Severity::Warning));
    }

    #[tokio::test]
    async fn test_sink_error_is_isolated_to_one_metric() {
        let (mut sampler, record) = sampler(false, Some(MetricKind::CpuTemp));
        let report = sampler.tick().await;

        assert_eq!(report.failed, 1);
        assert_eq!(report.shown, 4);
        let record = record.lock().unwrap();
        let kinds: Vec<_> = record.ticks[0].iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MetricKind::CpuLoad,
                MetricKind::Ram,
                MetricKind::Swap,
                MetricKind::GpuTemp,
                MetricKind::Disk
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_between_ticks() {
        let (mut sampler, record) = sampler(true, Some(MetricKind::Disk));

        // Ticks start at 0, 1.5s and 3.0s
        let _ = tokio::time::timeout(
            Duration::from_millis(3100),
            sampler.run(std::future::pending()),
        )
        .await;

        assert_eq!(sampler.ticks(), 3);
        let record = record.lock().unwrap();
        assert_eq!(record.started_at.len(), 3);
        for pair in record.started_at.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap >= Duration::from_millis(1500), "gap {:?}", gap);
            assert!(gap < Duration::from_millis(1510), "gap {:?}", gap);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_shutdown() {
        let (mut sampler, _record) = sampler(false, None);
        sampler.run(tokio::time::sleep(Duration::from_millis(2000))).await;
        assert_eq!(sampler.ticks(), 2);
    }
}
