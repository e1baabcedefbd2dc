//! Configuration validation logic

use super::Config;
use crate::constants::MAX_WORKERS_LIMIT;
use crate::errors::{BoomError, ErrorContext, Result};
use url::Url;

/// Validate the configuration
pub fn validate(config: &Config) -> Result<()> {
    validate_target(config)?;
    validate_load_config(config)?;
    validate_client_config(config)?;
    Ok(())
}

/// Validate target configuration
fn validate_target(config: &Config) -> Result<()> {
    let url = Url::parse(&config.target.url)
        .with_config_context(&format!("Invalid target URL '{}'", config.target.url))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(BoomError::config(format!(
                "Invalid URL scheme '{}'. Only 'http' and 'https' are supported",
                scheme
            )));
        }
    }

    url.host_str()
        .with_config_context(&format!("Target URL '{}' has no host", config.target.url))?;

    Ok(())
}

/// Validate request and worker counts
fn validate_load_config(config: &Config) -> Result<()> {
    let requests = config.load.total_requests;
    let concurrency = config.load.concurrency;

    if requests == 0 || concurrency == 0 {
        return Err(BoomError::config(format!(
            "The number of requests ({}) and the number of concurrent requests ({}) must be greater than 0",
            requests, concurrency
        )));
    }

    if concurrency > MAX_WORKERS_LIMIT {
        return Err(BoomError::config(format!(
            "The number of concurrent requests ({}) cannot exceed {}",
            concurrency, MAX_WORKERS_LIMIT
        )));
    }

    if requests < u64::from(concurrency) {
        return Err(BoomError::config(format!(
            "The number of requests ({}) cannot be less than the number of concurrent requests ({})",
            requests, concurrency
        )));
    }

    Ok(())
}

/// Validate client configuration
fn validate_client_config(config: &Config) -> Result<()> {
    if config.client.timeout.is_zero() {
        return Err(BoomError::config("Timeout must be greater than 0"));
    }

    Ok(())
}
