//! Command-line interface for sources-populator
//!
//! # Usage Examples
//!
//! ```bash
//! # Default run: 3 tenants, 10 sources each, 10 concurrent requests
//! sources-populator \
//!   --sources-api-host http://localhost \
//!   --sources-api-port 8000
//!
//! # Reproducible run with a JSON report
//! sources-populator \
//!   --sources-api-host http://localhost \
//!   --sources-api-port 8000 \
//!   --seed 42 \
//!   --metrics-output populate-metrics.json
//! ```
//!
//! Every option can also be given through its environment variable, e.g.
//! `SOURCES_API_HOST`, `SOURCES_API_PORT`, `NUMBER_OF_TENANTS`,
//! `CONCURRENT_REQUESTS` and `LOG_LEVEL`.

use clap::Parser;
use loadtest_populate::PopulateArgs;
use sources_populator::{init_tracing, run_populate, LogOpts, SourcesApiOpts};

#[derive(Parser)]
#[command(name = "sources-populator")]
#[command(about = "Populate the Sources API with load test fixtures")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    api: SourcesApiOpts,

    #[command(flatten)]
    log: LogOpts,

    #[command(flatten)]
    populate: PopulateArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log.log_level, cli.log.log_format)?;

    run_populate(cli.api.endpoints(), &cli.populate).await?;
    Ok(())
}
