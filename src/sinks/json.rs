//! JSON-lines sink: one object per tick

use anyhow::Result;
use cyber_monitor_core::DisplaySink;
use cyber_monitor_types::{Metric, MetricKind, Severity, Unit};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct MetricRecord {
    name: MetricKind,
    value: Option<f64>,
    unit: Unit,
    #[serde(skip_serializing_if = "Option::is_none")]
    used_bytes: Option<u64>,
    text: String,
    severity: Severity,
}

#[derive(Debug, Serialize)]
struct TickRecord<'a> {
    timestamp: String,
    metrics: &'a [MetricRecord],
}

/// Emits each tick as a single JSON line for other programs to consume
pub struct JsonSink<W: Write + Send> {
    out: W,
    metrics: Vec<MetricRecord>,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            metrics: Vec::with_capacity(6),
        }
    }
}

impl<W: Write + Send> DisplaySink for JsonSink<W> {
    fn begin_tick(&mut self) -> Result<()> {
        self.metrics.clear();
        Ok(())
    }

    fn show(&mut self, metric: &Metric, text: &str, severity: Severity) -> Result<()> {
        self.metrics.push(MetricRecord {
            name: metric.kind,
            value: metric.value,
            unit: metric.unit,
            used_bytes: metric.used_bytes,
            text: text.to_string(),
            severity,
        });
        Ok(())
    }

    fn end_tick(&mut self) -> Result<()> {
        let record = TickRecord {
            timestamp: chrono::Local::now().to_rfc3339(),
            metrics: &self.metrics,
        };
        serde_json::to_writer(&mut self.out, &record)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
