mod config;
mod runner;
mod stats;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use config::BenchConfig;
use runner::BenchRunner;

#[derive(Parser, Debug)]
#[command(name = "bench")]
#[command(about = "Benchmark utility for the /http tool endpoint", long_about = None)]
struct Args {
    /// Path to the benchmark configuration file (TOML)
    config_file: PathBuf,

    /// Endpoint URL, overriding `url` from the config file
    #[arg(long)]
    url: Option<String>,

    /// Number of iterations to run
    #[arg(short = 'i', long, default_value = "1")]
    iterations: usize,

    /// Log file path
    #[arg(long = "log-file")]
    log_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log-level", default_value = "info")]
    log_level: String,
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = parse_level(&args.log_level);

    // Setup logging with optional file output
    if let Some(log_file_path) = &args.log_file {
        use std::fs::OpenOptions;
        use tracing_subscriber::fmt::writer::MakeWriterExt;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file_path)
            .context("Failed to open log file")?;

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(false)
            .with_writer(file.and(std::io::stdout))
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to set tracing subscriber")?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(false)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to set tracing subscriber")?;
    }

    let mut config = BenchConfig::from_file(&args.config_file)
        .context("Failed to load benchmark configuration")?;
    if let Some(url) = args.url {
        config.url = url;
    }

    if args.iterations == 0 {
        anyhow::bail!("--iterations must be at least 1");
    }
    if config.steps.is_empty() {
        anyhow::bail!("No steps defined in {}", args.config_file.display());
    }

    BenchRunner::new(config, args.iterations)?.run().await?;

    Ok(())
}
