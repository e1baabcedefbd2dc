//! Domain-specific error types for the boom load generator
//!
//! Every fatal condition (bad configuration, broken channel, failed task) is a
//! `BoomError` propagated up to `main`. Per-request failures are also expressed
//! as `BoomError::Transport`, but the worker that sees them never lets them escape.

use thiserror::Error;

/// Main error type for the boom application
#[derive(Error, Debug)]
pub enum BoomError {
    /// Configuration-related errors (validation of CLI input)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A single request attempt failed (connection, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A coordination channel was closed or dropped while still needed
    #[error("Channel error: {0}")]
    Channel(String),

    /// A spawned task panicked or was cancelled
    #[error("Task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Report output errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type using BoomError
pub type Result<T> = std::result::Result<T, BoomError>;

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    fn with_config_context(self, msg: &str) -> Result<T>;
    fn with_transport_context(self, msg: &str) -> Result<T>;
    fn with_channel_context(self, msg: &str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_config_context(self, msg: &str) -> Result<T> {
        self.map_err(|e| BoomError::Config(format!("{}: {}", msg, e)))
    }

    fn with_transport_context(self, msg: &str) -> Result<T> {
        self.map_err(|e| BoomError::Transport(format!("{}: {}", msg, e)))
    }

    fn with_channel_context(self, msg: &str) -> Result<T> {
        self.map_err(|e| BoomError::Channel(format!("{}: {}", msg, e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn with_config_context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| BoomError::Config(msg.to_string()))
    }

    fn with_transport_context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| BoomError::Transport(msg.to_string()))
    }

    fn with_channel_context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| BoomError::Channel(msg.to_string()))
    }
}

// Convenience constructors
impl BoomError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        BoomError::Config(msg.into())
    }

    pub fn channel<S: Into<String>>(msg: S) -> Self {
        BoomError::Channel(msg.into())
    }
}
