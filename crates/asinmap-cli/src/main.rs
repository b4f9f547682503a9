mod io;
mod reconcile;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use asinmap_core::{AppConfig, RunStatistics};

#[derive(Debug, Parser)]
#[command(name = "asinmap")]
#[command(about = "Resolves catalog rows to ASINs via retail search results")]
struct Cli {
    /// Input catalog: SKU, name, description, colour, size (header skipped).
    input: PathBuf,
    /// Success sink: one `SKU, ASIN` row per resolved line.
    output: PathBuf,
    /// Failure sink: one `line, SKU, reason` row per unresolved line.
    errors: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match asinmap_core::load_app_config() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info");
            tracing::error!("fatal: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_level);

    match run(&cli, &config).await {
        Ok(stats) => {
            tracing::info!(
                processed = stats.processed,
                succeeded = stats.succeeded,
                failed = stats.failed,
                "processing complete"
            );
            println!(
                "{} lines processed: {} ASINs found, {} not found (see {} for details)",
                stats.processed,
                stats.succeeded,
                stats.failed,
                cli.errors.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Opens the input and both sinks, builds the client, and drives the run.
/// Any error out of here is a setup or sink defect and is fatal to the
/// process; per-row defects never surface through this path.
async fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<RunStatistics> {
    let mut reader = io::InputReader::open(&cli.input)?;
    let mut writers = io::OutcomeWriters::create(&cli.output, &cli.errors)?;
    let client = asinmap_scraper::PageClient::new(config)?;

    let mut reconciler = reconcile::Reconciler::new(client);
    reconciler.run(&mut reader, &mut writers).await
}

fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
