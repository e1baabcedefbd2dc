use std::time::{Duration, Instant};

/// Result of one successful request attempt
///
/// Failed attempts never produce a `RequestStat`; the worker that issued them
/// only counts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestStat {
    pub status_code: u16,
    pub latency: Duration,
}

impl RequestStat {
    #[inline]
    pub fn new(status_code: u16, latency: Duration) -> Self {
        Self {
            status_code,
            latency,
        }
    }

    /// Build a stat from the instants bracketing the request
    #[inline]
    pub fn from_timing(status_code: u16, sent_at: Instant, completed_at: Instant) -> Self {
        Self::new(status_code, completed_at.saturating_duration_since(sent_at))
    }

    /// Latency in whole milliseconds, the unit every report uses
    #[inline]
    pub fn latency_ms(&self) -> u64 {
        u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Verbose trace format: `<status>,<latency ms>`
impl std::fmt::Display for RequestStat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.status_code, self.latency_ms())
    }
}
