mod client;
mod common;
mod config;
mod constants;
mod errors;
mod metrics;
mod stat;

use client::{HttpClient, Orchestrator};
use config::Config;
use config::parser::RawConfig;
use errors::Result;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("boom failed: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Usage errors exit here, before anything else starts
    let raw_config = RawConfig::parse_from_args();

    init_logging(raw_config.verbose);

    let config = Config::from_raw(raw_config)?;

    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    config.print_summary();

    let client = Arc::new(HttpClient::new(config.timeout_duration())?);

    let report = Orchestrator::new(config, client).run().await?;
    report.print()?;

    Ok(())
}

/// Initialize logging on stderr, leaving stdout to the report
fn init_logging(verbose: bool) {
    let boom_level = if verbose { "debug" } else { "info" };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(
                    format!("boom={}", boom_level)
                        .parse()
                        .expect("Invalid filter directive"),
                )
                .add_directive("reqwest=warn".parse().expect("Invalid filter directive"))
                .add_directive("hyper=warn".parse().expect("Invalid filter directive")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default subscriber");

    if verbose {
        info!("Verbose logging enabled");
    }
}
