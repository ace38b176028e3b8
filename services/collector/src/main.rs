//! Footprint collector.
//!
//! Collects dataset footprints and metadata for every configured product
//! and writes the portal catalog.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use collector::config::LoggingConfig;
use collector::config_loader::validate_collector_config;
use collector::{load_all_configs, Collector, ConfigOverrides, NetCdfReader};

#[derive(Parser, Debug)]
#[command(name = "collector")]
#[command(about = "Collect dataset footprints and metadata into a portal catalog")]
struct Args {
    /// Directory containing collector.yaml and the products directory
    #[arg(short, long, default_value = "config", env = "COLLECTOR_CONFIG_DIR")]
    config_dir: PathBuf,

    /// Collect a single product (default: all enabled)
    #[arg(short, long)]
    product: Option<String>,

    /// Override output.dir
    #[arg(long, env = "COLLECTOR_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Override output.portal_file
    #[arg(long, env = "COLLECTOR_PORTAL_FILE")]
    portal_file: Option<PathBuf>,

    /// Override footprint.target_points
    #[arg(long)]
    target_points: Option<usize>,

    /// Override collection.parallel
    #[arg(long)]
    parallel: Option<usize>,

    /// Skip map rendering
    #[arg(long)]
    no_map: bool,

    /// Exit with an error if any product fails
    #[arg(long)]
    strict: bool,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format: json or pretty
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    netcdf_reader::silence_hdf5_errors();

    let args = Args::parse();
    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            // Logging may not be initialized yet
            eprintln!("collector: {:#}", e);
            error!(error = %format!("{:#}", e), "Collection aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let mut configs = load_all_configs(&args.config_dir)
        .with_context(|| format!("Failed to load configuration from {:?}", args.config_dir))?;

    ConfigOverrides {
        output_dir: args.output_dir,
        portal_file: args.portal_file,
        target_points: args.target_points,
        parallel: args.parallel,
        no_map: args.no_map,
        log_level: args.log_level,
        log_format: args.log_format,
    }
    .apply(&mut configs.collector);
    validate_collector_config(&configs.collector).context("Invalid command-line override")?;

    init_tracing(&configs.collector.logging)?;

    if let Some(product) = &args.product {
        configs.select_product(product)?;
    }

    info!(
        provider = %configs.collector.provider.name,
        products = ?configs.products.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
        output = %configs.collector.output.dir.display(),
        "Loaded configuration"
    );

    let timeout = Duration::from_secs(configs.collector.collection.http_timeout_secs);
    let reader = Arc::new(NetCdfReader::new(timeout)?);
    let collector = Collector::new(configs.collector, reader);

    let report = collector.run(&configs.products).await?;
    report.log_summary();

    if args.strict && report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = fmt().with_env_filter(filter).with_target(true).with_level(true);

    let result = match logging.format.as_str() {
        "pretty" => builder.pretty().try_init(),
        _ => builder.json().try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
