//! Application-wide constants and tuning values

// Worker pool constants
pub const MAX_WORKERS_LIMIT: u32 = 10_000;

// Channel and buffer constants
pub const RESULTS_CHANNEL_BUFFER: usize = 100;

// Logging cadence
pub const DEBUG_LOG_INTERVAL: u64 = 100;
