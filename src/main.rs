//! projdata - static-site project data generator
//!
//! Collects every `<root>/<project>/info.json` into one JavaScript file
//! that assigns the project list to a global variable.
//!
//! Exit codes:
//!   0 - Success (including runs where some projects were skipped)
//!   1 - Invalid arguments or settings, bad explicit config, or output write failure

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod scanner;

use analysis::AggregateOutcome;
use anyhow::{Context, Result};
use cli::Args;
use config::{AggregatorConfig, Config, CONFIG_FILE_NAME};
use scanner::{ProjectScanner, ScanConfig};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, Registry};

/// Lets the level chosen on the command line be raised once the config file is read.
type LogHandle = reload::Handle<LevelFilter, Registry>;

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    let log_handle = init_logging(&args)?;

    info!("projdata v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args, &log_handle) {
        error!("Generation failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: write a default .projdata.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE_NAME);
        std::process::exit(1);
    }

    let content = Config::default_toml()?;
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) -> Result<LogHandle> {
    let (filter, handle) = reload::Layer::new(LevelFilter::from_level(args.log_level()));

    let format = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init()
        .context("Failed to set tracing subscriber")?;

    Ok(handle)
}

/// Resolve configuration, aggregate, and write (or print) the data script.
fn run(args: Args, log_handle: &LogHandle) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let level = config.log_level(args.quiet);
    if let Err(e) = log_handle.reload(LevelFilter::from_level(level)) {
        warn!("Failed to apply log level {}: {}", level, e);
    }

    let settings = &config.aggregator;
    settings.validate()?;

    info!("Scanning projects in {}", settings.root_dir.display());
    let (outcome, script) = generate(settings)?;

    if args.dry_run {
        println!("{}", script);
        info!(
            "Dry run: {} projects, {} not written",
            outcome.count(),
            settings.output.display()
        );
        return Ok(());
    }

    report::write_data_script(&settings.output, &script)?;

    if !outcome.skipped.is_empty() {
        let names: Vec<&str> = outcome.skipped.iter().map(|s| s.name.as_str()).collect();
        warn!(
            "Skipped {} project(s) with unreadable info.json: {}",
            names.len(),
            names.join(", ")
        );
    }
    debug!(
        "{} of {} projects visible, took {:.3}s",
        outcome.visible_count(),
        outcome.count(),
        start_time.elapsed().as_secs_f64()
    );

    println!(
        "✅ Generated {} with {} projects.",
        settings.output.display(),
        outcome.count()
    );

    Ok(())
}

/// Aggregate the projects under `settings.root_dir` and render the script.
fn generate(settings: &AggregatorConfig) -> Result<(AggregateOutcome, String)> {
    let scanner = ProjectScanner::new(&settings.root_dir, ScanConfig::from(settings));
    let outcome = analysis::aggregate_projects(&scanner);
    let script = report::generate_data_script(&settings.variable, &outcome.records)?;
    Ok((outcome, script))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
