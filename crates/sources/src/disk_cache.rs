//! Short-lived cache for the filesystem usage query

use anyhow::Result;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
struct CachedUsage {
    percent: f64,
    taken_at: Instant,
}

/// Serves the last disk usage reading while it is younger than `ttl`
///
/// A failed refresh leaves the previous entry untouched. Because that entry
/// is already stale, the next call retries instead of waiting out a window.
#[derive(Debug, Clone)]
pub struct DiskCache {
    ttl: Duration,
    entry: Option<CachedUsage>,
}

impl DiskCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Cached value if it is still fresh at `now`
    pub fn fresh(&self, now: Instant) -> Option<f64> {
        self.entry
            .filter(|entry| now.saturating_duration_since(entry.taken_at) < self.ttl)
            .map(|entry| entry.percent)
    }

    /// Return the cached percentage, or run `refresh` and store its result
    pub fn get_or_refresh<F>(&mut self, now: Instant, refresh: F) -> Option<f64>
    where
        F: FnOnce() -> Result<f64>,
    {
        if let Some(percent) = self.fresh(now) {
            return Some(percent);
        }

        match refresh() {
            Ok(percent) if percent.is_finite() => {
                self.entry = Some(CachedUsage {
                    percent,
                    taken_at: now,
                });
                Some(percent)
            }
            Ok(percent) => {
                log::debug!("Discarding non-finite disk usage {}", percent);
                None
            }
            Err(e) => {
                log::debug!("Disk usage refresh failed: {}", e);
                None
            }
        }
    }
}
