use anyhow::{Context, Result};
use clap::Parser;
use cyber_monitor::config::{MonitorConfig, OutputFormat};
use cyber_monitor::core::Sampler;
use cyber_monitor::sinks::{JsonSink, TerminalSink};
use cyber_monitor::sources::{self, MetricSource};
use cyber_monitor::types::{SeverityThresholds, TemperatureScale};
use cyber_monitor_core::{
    BoxedDisplaySink, COMMAND_TIMEOUT, CPU_PRIME_DELAY, DEFAULT_DISK_PATH, DISK_CACHE_TTL,
    TICK_INTERVAL,
};
use log::{error, info, warn};
use std::io::IsTerminal;
use std::path::PathBuf;

/// cyber-monitor - An always-on CPU, memory, temperature and disk panel for Linux
#[derive(Parser, Debug, Clone)]
#[command(name = "cyber-monitor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Delay between refreshes in milliseconds
    #[arg(
        long = "interval-ms",
        value_name = "MS",
        default_value_t = TICK_INTERVAL.as_millis() as u64
    )]
    interval_ms: u64,

    /// Mount point reported as DISK
    #[arg(long = "disk-path", value_name = "PATH", default_value = DEFAULT_DISK_PATH)]
    disk_path: PathBuf,

    /// Upper bound for each external tool invocation (sensors, nvidia-smi)
    #[arg(long = "command-timeout-ms", value_name = "MS", default_value_t = COMMAND_TIMEOUT.as_millis() as u64)]
    command_timeout_ms: u64,

    /// How long a disk usage reading is reused before it is queried again
    #[arg(long = "disk-cache-ms", value_name = "MS", default_value_t = DISK_CACHE_TTL.as_millis() as u64)]
    disk_cache_ms: u64,

    /// Output format
    #[arg(long = "output", value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Disable ANSI colors in text output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Print a single refresh and exit
    #[arg(long = "once")]
    once: bool,

    /// Temperature (°C) where the warning tier starts; requires --temp-danger
    #[arg(long = "temp-warning", value_name = "CELSIUS", requires = "temp_danger")]
    temp_warning: Option<f64>,

    /// Temperature (°C) where the danger tier starts; requires --temp-warning
    #[arg(long = "temp-danger", value_name = "CELSIUS", requires = "temp_warning")]
    temp_danger: Option<f64>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

impl Cli {
    fn config(&self) -> MonitorConfig {
        let temperature_scale = match (self.temp_warning, self.temp_danger) {
            (Some(warning), Some(danger)) => {
                TemperatureScale::Celsius(SeverityThresholds::new(warning, danger))
            }
            _ => TemperatureScale::PercentOf100C,
        };

        MonitorConfig {
            update_interval_ms: self.interval_ms,
            disk_path: self.disk_path.clone(),
            disk_cache_ms: self.disk_cache_ms,
            command_timeout_ms: self.command_timeout_ms,
            output: self.output,
            color: !self.no_color,
            temperature_scale,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting cyber-monitor v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.config();
    config.validate().context("invalid configuration")?;
    match serde_json::to_string(&config) {
        Ok(json) => info!("Configuration: {}", json),
        Err(e) => error!("Failed to serialize configuration: {}", e),
    }

    // Shared sensor cache must exist before the first source is built
    sources::initialize_sensors();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(run(config, cli.once));
    info!("cyber-monitor stopped");
    Ok(())
}

async fn run(config: MonitorConfig, once: bool) {
    let sink: BoxedDisplaySink = match config.output {
        OutputFormat::Text => {
            let stdout = std::io::stdout();
            let redraw = !once && stdout.is_terminal();
            Box::new(TerminalSink::new(stdout, config.color, redraw))
        }
        OutputFormat::Json => Box::new(JsonSink::new(std::io::stdout())),
    };

    let source = MetricSource::system(config.source_settings());
    let mut sampler = Sampler::new(source, sink, config.renderer(), config.tick_interval());

    if once {
        // CPU usage is a delta between two refreshes
        tokio::time::sleep(CPU_PRIME_DELAY).await;
        let report = sampler.tick().await;
        info!("Single refresh: {:?}", report);
        return;
    }

    sampler.run(shutdown_signal()).await;
    info!("Sampler stopped after {} ticks", sampler.ticks());
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received interrupt, shutting down"),
        Err(e) => {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
