//! Orchestrator that fans requests out to workers and shuts the run down

use crate::client::{Completion, RequestClient, Worker};
use crate::common::WorkerId;
use crate::config::Config;
use crate::constants::RESULTS_CHANNEL_BUFFER;
use crate::errors::{BoomError, ErrorContext, Result};
use crate::metrics::{Aggregator, RunReport, RunSummary};

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Owns one run: one aggregator, `concurrency` workers, and the shutdown handshake
pub struct Orchestrator {
    config: Config,
    client: Arc<dyn RequestClient>,
    output: Box<dyn Write + Send>,
}

impl Orchestrator {
    pub fn new(config: Config, client: Arc<dyn RequestClient>) -> Self {
        Self {
            config,
            client,
            output: Box::new(std::io::stdout()),
        }
    }

    /// Redirect the aggregator's trace and average lines
    #[cfg(test)]
    pub fn with_output(mut self, output: Box<dyn Write + Send>) -> Self {
        self.output = output;
        self
    }

    /// Run every worker to completion, then stop the aggregator and collect its summary
    pub async fn run(self) -> Result<RunReport> {
        let Orchestrator {
            config,
            client,
            output,
        } = self;

        let concurrency = config.load.concurrency;
        debug_assert!(concurrency > 0, "validated config has at least one worker");
        let quota = config.quota();
        let undispatched = config.undispatched_requests();
        if undispatched > 0 {
            warn!(
                "{} of {} requests will not be dispatched ({} workers x {} requests)",
                undispatched, config.load.total_requests, concurrency, quota
            );
        }

        let start = Instant::now();

        let (done_tx, done_rx) = mpsc::channel::<Completion>(concurrency as usize);
        let (results_tx, results_rx) = mpsc::channel(RESULTS_CHANNEL_BUFFER);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let (ack_tx, ack_rx) = oneshot::channel::<RunSummary>();

        let aggregator = Aggregator::new(
            results_rx,
            stop_rx,
            ack_tx,
            config.output.verbose,
            output,
        );
        let aggregator_handle = tokio::spawn(aggregator.run());

        info!("Starting {} workers with {} requests each", concurrency, quota);
        let worker_handles: Vec<JoinHandle<Result<()>>> = (0..concurrency)
            .map(|id| {
                let worker = Worker::new(
                    WorkerId::from(id),
                    config.target.url.clone(),
                    quota,
                    Arc::clone(&client),
                    results_tx.clone(),
                    done_tx.clone(),
                );
                tokio::spawn(worker.run())
            })
            .collect();

        // Only the workers may hold senders from here on, so a closed channel
        // means a worker died before completing.
        drop(results_tx);
        drop(done_tx);

        // stop_tx is dropped with this block on failure, so a still-running
        // aggregator returns instead of waiting forever.
        let shutdown = async move {
            let counts = wait_for_workers(done_rx, concurrency).await?;

            debug!("All workers completed, stopping aggregator");
            stop_tx
                .send(())
                .map_err(|_| BoomError::channel("Aggregator exited before the stop request"))?;
            let summary = ack_rx
                .await
                .with_channel_context("Aggregator exited without acknowledging stop")?;
            Ok::<_, BoomError>((counts, summary))
        }
        .await;

        let ((dispatched, failed), summary) = match shutdown {
            Ok(outcome) => outcome,
            Err(e) => return Err(aggregator_failure(aggregator_handle, e).await),
        };

        for result in futures_util::future::join_all(worker_handles).await {
            result??;
        }
        aggregator_handle.await??;

        let run_time = start.elapsed();
        info!(
            "Run finished: {} succeeded, {} failed in {:.3}s",
            summary.success_count,
            failed,
            run_time.as_secs_f64()
        );

        Ok(RunReport {
            summary,
            requested: config.load.total_requests,
            dispatched,
            failed,
            run_time,
        })
    }
}

/// The aggregator's own error when it died first, else the channel error it caused
async fn aggregator_failure(handle: JoinHandle<Result<()>>, fallback: BoomError) -> BoomError {
    match handle.await {
        Ok(Ok(())) | Ok(Err(BoomError::Channel(_))) => fallback,
        Ok(Err(e)) => e,
        Err(e) => BoomError::TaskJoin(e),
    }
}

/// Receive exactly `expected` completion signals; returns (dispatched, failed)
async fn wait_for_workers(
    mut done_rx: mpsc::Receiver<Completion>,
    expected: u32,
) -> Result<(u64, u64)> {
    let mut dispatched = 0u64;
    let mut failed = 0u64;

    for received in 0..expected {
        let completion = done_rx.recv().await.with_channel_context(&format!(
            "Completion channel closed after {} of {} workers",
            received, expected
        ))?;
        debug!(
            "Worker {} completed ({}/{})",
            completion.worker_id,
            received + 1,
            expected
        );
        dispatched += completion.dispatched;
        failed += completion.failed;
    }

    Ok((dispatched, failed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::MockClient;
    use crate::metrics::testing::SharedBuffer;
    use std::time::Duration;

    fn config(total_requests: u64, concurrency: u32, verbose: bool) -> Config {
        let mut config = Config::default_http("http://localhost:8080".to_string());
        config.load.total_requests = total_requests;
        config.load.concurrency = concurrency;
        config.output.verbose = verbose;
        config
    }

    async fn run_with(config: Config, client: Arc<MockClient>) -> (RunReport, String) {
        let output = SharedBuffer::default();
        let report = Orchestrator::new(config, client)
            .with_output(Box::new(output.clone()))
            .run()
            .await
            .unwrap();
        (report, output.contents())
    }

    #[tokio::test]
    async fn test_even_split_all_successful() {
        let client = Arc::new(MockClient::new(200, Duration::from_millis(100)));
        let (report, output) = run_with(config(10, 5, false), client.clone()).await;

        assert_eq!(client.calls(), 10);
        assert_eq!(report.dispatched, 10);
        assert_eq!(report.failed, 0);
        assert_eq!(report.summary.success_count, 10);
        assert_eq!(report.summary.average_latency_ms(), Some(100));
        assert_eq!(output, "Avg response time for 10 requests: 100 ms\n");
    }

    #[tokio::test]
    async fn test_remainder_is_not_dispatched() {
        let client = Arc::new(MockClient::new(200, Duration::from_millis(20)));
        let (report, _) = run_with(config(11, 5, false), client.clone()).await;

        assert_eq!(client.calls(), 10);
        assert_eq!(report.requested, 11);
        assert_eq!(report.dispatched, 10);
        assert_eq!(report.summary.success_count, 10);
    }

    #[tokio::test]
    async fn test_single_worker_runs_sequentially() {
        let client = Arc::new(
            MockClient::new(204, Duration::from_millis(30)).with_delay(Duration::from_millis(2)),
        );
        let (report, output) = run_with(config(5, 1, true), client.clone()).await;

        assert_eq!(client.calls(), 5);
        assert_eq!(report.summary.success_count, 5);
        let traces: Vec<&str> = output.lines().filter(|l| *l == "204,30").collect();
        assert_eq!(traces.len(), 5);
    }

    #[tokio::test]
    async fn test_all_failures_yield_no_average() {
        let client = Arc::new(MockClient::failing());
        let (report, output) = run_with(config(10, 5, true), client.clone()).await;

        assert_eq!(client.calls(), 10);
        assert_eq!(report.summary.success_count, 0);
        assert_eq!(report.summary.average_latency_ms(), None);
        assert_eq!(report.failed, 10);
        assert_eq!(output, "");
    }

    #[tokio::test]
    async fn test_verbose_traces_only_successes() {
        let client = Arc::new(MockClient::new(200, Duration::from_millis(15)).with_fail_every(3));
        let (report, output) = run_with(config(12, 4, true), client).await;

        let traces = output.lines().filter(|l| *l == "200,15").count();
        assert_eq!(report.summary.success_count, 8);
        assert_eq!(report.failed, 4);
        assert_eq!(traces, 8);
    }

    #[tokio::test]
    async fn test_slow_workers_are_all_counted_before_stop() {
        // More results than the channel buffer holds, so workers hit backpressure
        // while the aggregator is still consuming.
        let client = Arc::new(
            MockClient::new(200, Duration::from_millis(5)).with_delay(Duration::from_millis(1)),
        );
        let (report, _) = run_with(config(400, 8, false), client.clone()).await;

        assert_eq!(client.calls(), 400);
        assert_eq!(report.summary.success_count, 400);
        assert_eq!(report.summary.total_latency_ms, 2_000);
    }

    /// Writer whose every write fails, like stdout on a closed pipe
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_trace_write_failure_is_reported() {
        let client = Arc::new(MockClient::new(200, Duration::from_millis(10)));
        let result = Orchestrator::new(config(10, 5, true), client)
            .with_output(Box::new(BrokenPipe))
            .run()
            .await;

        match result {
            Err(BoomError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
            other => panic!("expected an I/O error, got {:?}", other.map(|r| r.dispatched)),
        }
    }

    #[tokio::test]
    async fn test_average_write_failure_is_reported() {
        let client = Arc::new(MockClient::new(200, Duration::from_millis(10)));
        let result = Orchestrator::new(config(10, 5, false), client)
            .with_output(Box::new(BrokenPipe))
            .run()
            .await;

        assert!(matches!(result, Err(BoomError::Io(_))));
    }

    #[tokio::test]
    async fn test_wait_for_workers_sums_completions() {
        let (done_tx, done_rx) = mpsc::channel(3);
        for (id, failed) in [(0, 0), (1, 2), (2, 1)] {
            done_tx
                .send(Completion {
                    worker_id: WorkerId::from(id),
                    dispatched: 4,
                    failed,
                })
                .await
                .unwrap();
        }

        let (dispatched, failed) = wait_for_workers(done_rx, 3).await.unwrap();
        assert_eq!(dispatched, 12);
        assert_eq!(failed, 3);
    }

    #[tokio::test]
    async fn test_missing_completion_is_fatal() {
        let (done_tx, done_rx) = mpsc::channel(2);
        done_tx
            .send(Completion {
                worker_id: WorkerId::from(0),
                dispatched: 1,
                failed: 0,
            })
            .await
            .unwrap();
        drop(done_tx);

        let result = wait_for_workers(done_rx, 2).await;
        assert!(matches!(result, Err(BoomError::Channel(_))));
    }
}
