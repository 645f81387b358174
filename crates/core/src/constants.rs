//! Shared constants for the application

use std::time::Duration;

/// Delay between the end of one tick and the start of the next
pub const TICK_INTERVAL: Duration = Duration::from_millis(1500);

/// How long a disk usage reading is served from cache
pub const DISK_CACHE_TTL: Duration = Duration::from_secs(5);

/// Upper bound for any external tool invocation
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(1);

/// Minimum interval between hardware sensor refreshes.
/// CPU and GPU chains share one refresh within a tick.
pub const SENSOR_REFRESH_INTERVAL: Duration = Duration::from_millis(250);

/// Delay between priming the CPU counters and the first usable load reading
pub const CPU_PRIME_DELAY: Duration = Duration::from_millis(200);

/// Mount point whose usage is reported as DISK
pub const DEFAULT_DISK_PATH: &str = "/";

pub const BYTES_PER_KB: f64 = 1024.0;
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Number of cells in a usage bar
pub const BAR_CELLS: usize = 10;
pub const BAR_FILLED: char = '█';
pub const BAR_EMPTY: char = '░';

/// Text shown for a metric no strategy could read
pub const UNAVAILABLE_TEXT: &str = "N/A";
