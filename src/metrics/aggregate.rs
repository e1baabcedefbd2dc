//! Fan-in of request results from every worker

use crate::constants::DEBUG_LOG_INTERVAL;
use crate::errors::{BoomError, ErrorContext, Result};
use crate::metrics::summary::RunSummary;
use crate::stat::RequestStat;

use std::io::Write;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Consumes results until told to stop, then reports and acknowledges
///
/// The acknowledgement carries the final summary, so the orchestrator cannot
/// observe it before the average line has been written.
pub struct Aggregator<W> {
    results_rx: mpsc::Receiver<RequestStat>,
    stop_rx: oneshot::Receiver<()>,
    ack_tx: oneshot::Sender<RunSummary>,
    verbose: bool,
    out: W,
    summary: RunSummary,
}

impl<W: Write + Send> Aggregator<W> {
    pub fn new(
        results_rx: mpsc::Receiver<RequestStat>,
        stop_rx: oneshot::Receiver<()>,
        ack_tx: oneshot::Sender<RunSummary>,
        verbose: bool,
        out: W,
    ) -> Self {
        Self {
            results_rx,
            stop_rx,
            ack_tx,
            verbose,
            out,
            summary: RunSummary::default(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut results_open = true;

        loop {
            // select! polls branches in random order, so neither side starves.
            tokio::select! {
                stat = self.results_rx.recv(), if results_open => match stat {
                    Some(stat) => self.record(stat)?,
                    None => {
                        debug!("Results channel closed, waiting for stop");
                        results_open = false;
                    }
                },
                stop = &mut self.stop_rx => {
                    stop.with_channel_context("Stop channel closed before a stop request")?;
                    break;
                }
            }
        }

        // Workers only signal completion after their sends returned, so anything
        // still unread is already buffered.
        while let Ok(stat) = self.results_rx.try_recv() {
            self.record(stat)?;
        }

        debug!(
            "Aggregator finished with {} results",
            self.summary.success_count
        );
        self.summary.write_average(&mut self.out)?;
        self.out.flush()?;

        self.ack_tx.send(self.summary).map_err(|_| {
            BoomError::channel("Orchestrator stopped waiting for the aggregator acknowledgement")
        })
    }

    fn record(&mut self, stat: RequestStat) -> Result<()> {
        self.summary.record(&stat);

        if self.verbose {
            writeln!(self.out, "{}", stat)?;
        }

        if self.summary.success_count % DEBUG_LOG_INTERVAL == 0 {
            debug!("Aggregated {} results", self.summary.success_count);
        }

        Ok(())
    }
}
