//! Command-line argument parsing for boom configuration

use clap::Parser;
use std::time::Duration;

use super::defaults::Defaults;
use super::{ClientConfig, Config, LoadConfig, OutputConfig, TargetConfig};

/// Raw configuration from command line arguments
#[derive(Parser, Debug, Clone)]
#[command(
    name = "boom",
    version,
    about = "An HTTP load generator that spreads a fixed number of GET requests over concurrent workers",
    long_about = None
)]
pub struct RawConfig {
    /// Target URL
    #[arg(value_name = "URL", help = "Target URL to load (http or https)")]
    pub url: String,

    /// Total number of requests
    #[arg(
        short = 'n',
        long = "requests",
        value_name = "COUNT",
        default_value_t = Defaults::TOTAL_REQUESTS,
        help = "Total number of requests, split evenly across workers"
    )]
    pub requests: u64,

    /// Number of concurrent workers
    #[arg(
        short = 'c',
        long = "concurrency",
        value_name = "COUNT",
        default_value_t = Defaults::CONCURRENCY,
        help = "Number of workers issuing requests concurrently"
    )]
    pub concurrency: u32,

    /// Per-request timeout in milliseconds
    #[arg(
        short = 't',
        long = "timeout",
        value_name = "MS",
        default_value_t = Defaults::TIMEOUT_MS,
        help = "Per-request timeout in milliseconds"
    )]
    pub timeout_ms: u64,

    /// Print one `<status>,<latency ms>` line per successful request
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Trace every successful request and enable debug logging"
    )]
    pub verbose: bool,
}

impl RawConfig {
    /// Parse from command line arguments, exiting with usage on error
    pub fn parse_from_args() -> Self {
        Self::parse()
    }
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Config {
            target: TargetConfig {
                url: raw.url.trim().to_string(),
            },
            load: LoadConfig {
                total_requests: raw.requests,
                concurrency: raw.concurrency,
            },
            client: ClientConfig {
                timeout: Duration::from_millis(raw.timeout_ms),
            },
            output: OutputConfig {
                verbose: raw.verbose,
            },
        }
    }
}
