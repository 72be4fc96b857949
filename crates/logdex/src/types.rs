//! Core types for the log index.
//!
//! This module provides:
//! - [`LogLevel`] - Normalized severity of a log entry
//! - [`LogEntry`] - One parsed log line with provenance
//! - [`LogFileMeta`] - One discovered log file
//! - [`RefreshSummary`] / [`IndexStats`] - Refresh accounting

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized log severity.
///
/// Source vocabularies are folded onto the five canonical levels; anything
/// unrecognized is kept lower-cased in [`LogLevel::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    /// Debugging information (also `trace`)
    Debug,
    /// General information
    Info,
    /// Warning conditions (also `warn`)
    Warning,
    /// Error conditions (also `err`, `fatal`)
    Error,
    /// Level could not be determined
    #[default]
    Unknown,
    /// Unrecognized source level, lower-cased
    Other(String),
}

impl LogLevel {
    /// Normalizes a source level string.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        match lower.as_str() {
            "debug" | "trace" => Self::Debug,
            "info" => Self::Info,
            "warn" | "warning" => Self::Warning,
            "error" | "err" | "fatal" => Self::Error,
            "unknown" | "" => Self::Unknown,
            _ => Self::Other(lower),
        }
    }

    /// Returns the string representation of this level.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Unknown => "unknown",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for LogLevel {
    fn from(value: String) -> Self {
        Self::normalize(&value)
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

/// One parsed log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// `<file name>:<line number>`, unique within a snapshot
    pub id: String,
    /// Normalized severity
    pub level: LogLevel,
    /// Cleaned, human-readable message
    pub message: String,
    /// When the line was logged (or parsed, if unknown)
    pub timestamp: DateTime<Utc>,
    /// Path of the file the line came from
    pub source_file: String,
    /// 1-based position among the non-blank lines of the file
    pub line_number: usize,
    /// The line exactly as read
    pub raw: String,
    /// Whether the line was a complete structured record
    pub is_structured: bool,
}

impl LogEntry {
    /// Builds the stable entry id for a line of a file.
    #[must_use]
    pub fn make_id(source_file: &str, line_number: usize) -> String {
        let name = Path::new(source_file)
            .file_name()
            .map_or_else(|| source_file.to_string(), |n| n.to_string_lossy().into_owned());
        format!("{name}:{line_number}")
    }
}

/// One discovered log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFileMeta {
    /// File name, e.g. `error2.log`
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: DateTime<Utc>,
    /// `debug` or `error`, from the file name prefix
    pub level: LogLevel,
    /// Directory the file was found in
    pub directory: PathBuf,
}

/// Outcome of a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSummary {
    /// Entries in the new snapshot
    pub entry_count: usize,
    /// Files scanned into the new snapshot
    pub file_count: usize,
    /// When the new snapshot was built
    pub built_at: DateTime<Utc>,
}

/// Whether a snapshot has been published yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStatus {
    /// Nothing built yet
    Empty,
    /// A snapshot is published
    Ready,
}

/// Summary of the currently published snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Index state
    pub status: IndexStatus,
    /// Number of entries
    pub entry_count: usize,
    /// Number of source files
    pub file_count: usize,
    /// Number of distinct terms
    pub term_count: usize,
    /// Entries parsed from structured records
    pub structured_count: usize,
    /// Build time of the snapshot, if any
    pub built_at: Option<DateTime<Utc>>,
}
