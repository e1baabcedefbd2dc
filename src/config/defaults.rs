//! Default values and configuration presets

#[cfg(test)]
use super::{ClientConfig, Config, LoadConfig, OutputConfig, TargetConfig};
#[cfg(test)]
use std::time::Duration;

/// Default configuration values
pub struct Defaults;

impl Defaults {
    pub const TOTAL_REQUESTS: u64 = 10;
    pub const CONCURRENCY: u32 = 5;
    pub const TIMEOUT_MS: u64 = 5_000;
}

#[cfg(test)]
impl Config {
    /// Create a default configuration against the given URL
    pub fn default_http(target_url: String) -> Self {
        Self {
            target: TargetConfig { url: target_url },
            load: LoadConfig {
                total_requests: Defaults::TOTAL_REQUESTS,
                concurrency: Defaults::CONCURRENCY,
            },
            client: ClientConfig {
                timeout: Duration::from_millis(Defaults::TIMEOUT_MS),
            },
            output: OutputConfig { verbose: false },
        }
    }
}
