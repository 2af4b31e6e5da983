//! Sparkmon - live Spark progress in the terminal
//!
//! Polls a Spark UI's monitoring API and shows every application with its
//! jobs, stages and task progress.
//!
//! Usage:
//!   sparkmon [HOST] [OPTIONS]
//!
//! Examples:
//!   sparkmon                              # http://localhost:4040
//!   sparkmon http://spark-driver:4040
//!   sparkmon http://spark-driver:4040 --refresh 2
//!
//! Keys: `r` refresh now, `q` / Ctrl+C quit.

use anyhow::{Context, Result};
use clap::Parser;
use sparkmon_core::{
    config::{DashConfig, DEFAULT_HOST},
    tui::{run, App, EventSource, TerminalManager},
    HttpStatusSource,
};
use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};
use tracing::{debug, error, info, Level};
use tracing_subscriber::EnvFilter;

/// Dashboard CLI arguments
#[derive(Parser)]
#[command(name = "sparkmon")]
#[command(about = "Live terminal dashboard for Spark jobs, stages and tasks")]
#[command(after_help = "Keys: r = refresh now, q / Ctrl+C = quit")]
#[command(version)]
struct Args {
    /// Spark UI base URL
    #[arg(default_value = DEFAULT_HOST)]
    host: String,

    /// Refresh interval in seconds
    #[arg(long, default_value = "5")]
    refresh: u64,

    /// HTTP request timeout in seconds (0 waits forever)
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log file (defaults to sparkmon.log in the system temp directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(level: &str, log_file: Option<PathBuf>) -> Result<()> {
    // Log to a file, never to the terminal the dashboard owns
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let level = level.as_str().to_lowercase();
    let filter = EnvFilter::new(format!("sparkmon={level},sparkmon_core={level}"));

    let path = log_file.unwrap_or_else(|| std::env::temp_dir().join("sparkmon.log"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = DashConfig::new(&args.host, args.refresh, args.timeout)
        .context("Invalid arguments")?;

    init_logging(&args.log_level, args.log_file)?;

    debug!("Sparkmon v{} starting...", env!("CARGO_PKG_VERSION"));
    info!("Monitoring {}", config.host);

    let source = HttpStatusSource::new(config.host.clone(), config.request_timeout)
        .context("Failed to build HTTP client")?;

    // Terminal is restored when `terminal` drops, on every return path
    let mut terminal = TerminalManager::new().context("Failed to initialize terminal")?;
    let size = terminal.size()?;

    let mut app = App::new(config.host.clone(), source, size);
    let mut events =
        EventSource::new(config.refresh_interval).context("Failed to listen for input")?;

    let result = run(&mut app, terminal.terminal_mut(), &mut events).await;
    drop(terminal);

    if let Err(err) = result {
        error!("Error: {:?}", err);
        return Err(err).context("Dashboard failed");
    }

    debug!("Dashboard exiting cleanly");
    Ok(())
}
