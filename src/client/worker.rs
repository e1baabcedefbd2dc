//! Worker issuing a fixed quota of sequential requests

use crate::client::RequestClient;
use crate::common::WorkerId;
use crate::errors::{ErrorContext, Result};
use crate::stat::RequestStat;

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Completion signal a worker sends once its quota is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub worker_id: WorkerId,
    pub dispatched: u64,
    pub failed: u64,
}

/// Runs `quota` requests one after another against a single URL
pub struct Worker {
    id: WorkerId,
    url: String,
    quota: u64,
    client: Arc<dyn RequestClient>,
    results_tx: mpsc::Sender<RequestStat>,
    done_tx: mpsc::Sender<Completion>,
}

impl Worker {
    pub fn new(
        id: WorkerId,
        url: String,
        quota: u64,
        client: Arc<dyn RequestClient>,
        results_tx: mpsc::Sender<RequestStat>,
        done_tx: mpsc::Sender<Completion>,
    ) -> Self {
        Self {
            id,
            url,
            quota,
            client,
            results_tx,
            done_tx,
        }
    }

    /// Issue the quota, then signal completion exactly once
    ///
    /// Failed attempts are dropped: no stat, no retry. They only show up in the
    /// `failed` count of the completion signal.
    pub async fn run(self) -> Result<()> {
        let Worker {
            id,
            url,
            quota,
            client,
            results_tx,
            done_tx,
        } = self;

        debug!("Worker {} starting {} requests against {}", id, quota, url);

        let mut failed = 0u64;
        for attempt in 1..=quota {
            match client.perform_request(&url).await {
                Ok(stat) => {
                    results_tx
                        .send(stat)
                        .await
                        .with_channel_context("Failed to send request stats")?;
                }
                Err(e) => {
                    failed += 1;
                    debug!("Worker {} request {} failed: {}", id, attempt, e);
                }
            }
        }

        // No stat may follow the completion signal.
        drop(results_tx);

        done_tx
            .send(Completion {
                worker_id: id,
                dispatched: quota,
                failed,
            })
            .await
            .with_channel_context("Failed to signal worker completion")?;

        debug!("Worker {} done, {} of {} failed", id, failed, quota);
        Ok(())
    }
}
