//! Request execution and the worker pool
//!
//! - The `RequestClient` seam between workers and the network
//! - reqwest-backed HTTP implementation
//! - Workers issuing their quota of requests
//! - The orchestrator coordinating workers and the aggregator

pub mod http;
pub mod manager;
pub mod worker;

// Re-export public types for easier access
pub use http::HttpClient;
pub use manager::Orchestrator;
pub use worker::{Completion, Worker};

use crate::errors::Result;
use crate::stat::RequestStat;

use async_trait::async_trait;

/// Performs one timed GET against a URL
///
/// Implementations enforce their own timeout: an attempt that runs past it
/// must come back as an error, never as a stat.
#[async_trait]
pub trait RequestClient: Send + Sync {
    async fn perform_request(&self, url: &str) -> Result<RequestStat>;
}
