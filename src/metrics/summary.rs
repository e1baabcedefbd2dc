//! Running totals kept by the aggregator

use crate::stat::RequestStat;

/// Count and latency sum over every successful request seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub success_count: u64,
    pub total_latency_ms: u64,
}

impl RunSummary {
    /// Fold one successful request into the totals
    pub fn record(&mut self, stat: &RequestStat) {
        self.success_count += 1;
        self.total_latency_ms = self.total_latency_ms.saturating_add(stat.latency_ms());
    }

    /// Mean latency in whole milliseconds, `None` when nothing succeeded
    pub fn average_latency_ms(&self) -> Option<u64> {
        if self.success_count == 0 {
            None
        } else {
            Some(self.total_latency_ms / self.success_count)
        }
    }
}
