//! Error types for the log index.

use thiserror::Error;

/// Errors that can occur while configuring or refreshing the index.
///
/// Per-line and per-file problems never surface here; they degrade to
/// fallback entries or skipped files and are reported through `tracing`.
#[derive(Debug, Error)]
pub enum LogdexError {
    /// No log directories were configured.
    #[error("no log directories configured")]
    NoDirectories,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A background refresh task failed to complete.
    #[error("refresh task failed: {0}")]
    RefreshTask(String),
}

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, LogdexError>;
