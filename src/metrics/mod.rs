//! Result aggregation and reporting
//!
//! - Running totals over successful requests
//! - The aggregator task that consumes worker results
//! - Final report formatting

pub mod aggregate;
pub mod reporting;
pub mod summary;

// Re-export public types for easier access
pub use aggregate::Aggregator;
pub use reporting::RunReport;
pub use summary::RunSummary;
