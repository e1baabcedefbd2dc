//! HTTP client implementation for load generation

use crate::client::RequestClient;
use crate::errors::{ErrorContext, Result};
use crate::stat::RequestStat;

use async_trait::async_trait;
use std::time::{Duration, Instant};

/// reqwest-backed client shared by every worker
///
/// `reqwest::Client` is reference counted internally; one instance serves the
/// whole pool.
pub struct HttpClient {
    http_client: reqwest::Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl RequestClient for HttpClient {
    async fn perform_request(&self, url: &str) -> Result<RequestStat> {
        let sent_at = Instant::now();

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .with_transport_context("HTTP request failed")?;
        let status = response.status();

        // The timed window covers the whole transfer, body included.
        response
            .bytes()
            .await
            .with_transport_context("Failed to read response body")?;

        Ok(RequestStat::from_timing(
            status.as_u16(),
            sent_at,
            Instant::now(),
        ))
    }
}
