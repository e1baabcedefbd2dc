//! Configuration management for the boom load generator
//!
//! This module provides a layered approach to configuration:
//! - Core structures
//! - CLI argument parsing
//! - Configuration validation
//! - Default value management

pub mod defaults;
pub mod parser;
pub mod validation;

use crate::errors::Result;
use std::time::Duration;

/// Target configuration
#[derive(Debug, Clone)]
pub struct TargetConfig {
    pub url: String,
}

/// How much load to generate and over how many workers
#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub total_requests: u64,
    pub concurrency: u32,
}

/// Per-request client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub verbose: bool,
}

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    pub target: TargetConfig,
    pub load: LoadConfig,
    pub client: ClientConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Convert parsed arguments and validate them
    pub fn from_raw(raw: parser::RawConfig) -> Result<Self> {
        let config = Config::from(raw);
        validation::validate(&config)?;
        Ok(config)
    }

    /// Requests each worker issues: floor(total / concurrency)
    pub fn quota(&self) -> u64 {
        self.load.total_requests / u64::from(self.load.concurrency)
    }

    /// Requests actually dispatched across all workers
    pub fn dispatched_requests(&self) -> u64 {
        self.quota() * u64::from(self.load.concurrency)
    }

    /// Requested but never dispatched because of the floor division
    pub fn undispatched_requests(&self) -> u64 {
        self.load.total_requests - self.dispatched_requests()
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        self.client.timeout
    }

    /// Print the startup report
    pub fn print_summary(&self) {
        println!("Running boom");
        println!("   Url:                 {}", self.target.url);
        println!("   Total Requests:      {}", self.load.total_requests);
        println!("   Concurrent Requests: {}", self.load.concurrency);
        println!("   Timeout:             {} ms", self.client.timeout.as_millis());
    }
}
