//! Display sink trait

use anyhow::Result;
use cyber_monitor_types::{Metric, Severity};

/// Receives rendered metrics once per tick
///
/// The sampler calls `begin_tick`, then `show` once per metric in panel
/// order, then `end_tick`. A sink makes no assumption about how values were
/// acquired; it only gets the final text and severity tier.
pub trait DisplaySink: Send {
    fn begin_tick(&mut self) -> Result<()> {
        Ok(())
    }

    fn show(&mut self, metric: &Metric, text: &str, severity: Severity) -> Result<()>;

    /// Flush whatever was collected during the tick
    fn end_tick(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Type-erased sink for dynamic dispatch
pub type BoxedDisplaySink = Box<dyn DisplaySink>;
