//! sysinfo-backed system probe

use anyhow::{anyhow, Result};
use cyber_monitor_core::{SystemProbe, BYTES_PER_GB};
use cyber_monitor_types::UsageSnapshot;
use std::path::Path;
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};

/// CPU, memory and filesystem counters read through sysinfo
pub struct SysinfoProbe {
    system: System,
    disks: Disks,
}

impl SysinfoProbe {
    pub fn new() -> Self {
        // The first CPU refresh only primes the counters; usage is computed
        // from the delta to the next refresh.
        let system = System::new_with_specifics(
            RefreshKind::new()
                .with_cpu(CpuRefreshKind::new().with_cpu_usage())
                .with_memory(MemoryRefreshKind::everything()),
        );

        log::info!(
            "System probe ready: {} CPUs, {:.1} GB memory, {:.1} GB swap",
            system.cpus().len(),
            system.total_memory() as f64 / BYTES_PER_GB,
            system.total_swap() as f64 / BYTES_PER_GB,
        );

        Self {
            system,
            disks: Disks::new(),
        }
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbe for SysinfoProbe {
    fn cpu_load(&mut self) -> Result<f64> {
        self.system
            .refresh_cpu_specifics(CpuRefreshKind::new().with_cpu_usage());
        Ok(self.system.global_cpu_usage() as f64)
    }

    fn memory(&mut self) -> Result<UsageSnapshot> {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            return Err(anyhow!("memory information unavailable"));
        }
        Ok(UsageSnapshot::new(total, self.system.used_memory()))
    }

    fn swap(&mut self) -> Result<UsageSnapshot> {
        self.system.refresh_memory();
        Ok(UsageSnapshot::new(
            self.system.total_swap(),
            self.system.used_swap(),
        ))
    }

    fn disk(&mut self, mount_point: &Path) -> Result<UsageSnapshot> {
        // Re-scan mounts so a remounted filesystem is picked up
        self.disks.refresh_list();

        let disk = self
            .disks
            .iter()
            .find(|disk| disk.mount_point() == mount_point)
            .ok_or_else(|| anyhow!("no filesystem mounted at {}", mount_point.display()))?;

        let total = disk.total_space();
        if total == 0 {
            return Err(anyhow!("filesystem at {} reports zero size", mount_point.display()));
        }
        // Blocks reserved for root count as used here, so on ext4 this reads a
        // few points higher than `df`, which divides by used + available.
        let used = total.saturating_sub(disk.available_space());
        Ok(UsageSnapshot::new(total, used))
    }
}
