//! Report formatting for the end of a run

use crate::metrics::summary::RunSummary;

use std::io::{self, Write};
use std::time::Duration;

impl RunSummary {
    /// Write the average line; nothing is written when no request succeeded
    pub fn write_average<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        if let Some(avg) = self.average_latency_ms() {
            writeln!(
                out,
                "Avg response time for {} requests: {} ms",
                self.success_count, avg
            )?;
        }
        Ok(())
    }
}

/// Everything known once the orchestrator has torn the run down
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,
    pub requested: u64,
    pub dispatched: u64,
    pub failed: u64,
    pub run_time: Duration,
}

impl RunReport {
    /// Write the dispatch counters and the run time
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Requests: {} dispatched of {} requested, {} failed",
            self.dispatched, self.requested, self.failed
        )?;
        writeln!(out, "Run time: {:.6}s", self.run_time.as_secs_f64())?;
        out.flush()
    }

    /// Print the closing lines to stdout
    pub fn print(&self) -> io::Result<()> {
        self.write_to(&mut io::stdout().lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(report: &RunReport) -> String {
        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_average_line_format() {
        let summary = RunSummary {
            success_count: 10,
            total_latency_ms: 1_000,
        };
        let mut out = Vec::new();
        summary.write_average(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Avg response time for 10 requests: 100 ms\n"
        );
    }

    #[test]
    fn test_no_average_line_without_successes() {
        let mut out = Vec::new();
        RunSummary::default().write_average(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_report_always_has_run_time() {
        let report = RunReport {
            summary: RunSummary::default(),
            requested: 11,
            dispatched: 10,
            failed: 10,
            run_time: Duration::from_millis(1_500),
        };

        let text = render(&report);
        assert_eq!(
            text,
            "Requests: 10 dispatched of 11 requested, 10 failed\nRun time: 1.500000s\n"
        );
    }
}
