//! Line parsing with JSON detection and heuristic fallback.
//!
//! Each non-blank line becomes exactly one [`LogEntry`]:
//! - A JSON object carrying `level`, `message` and `timestamp` produces a
//!   structured entry.
//! - Anything else produces a fallback entry whose level is inferred from the
//!   file name first and the line text second, and whose timestamp is scanned
//!   out of the text.
//!
//! Parsing never fails. Blank lines are dropped before numbering.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::fs::FileSystem;
use crate::types::{LogEntry, LogLevel};

/// ANSI colour sequences such as `ESC[31m`.
static ANSI_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[\d+m").unwrap_or_else(|_| unreachable!()));

/// ISO-8601-like timestamp embedded in free text.
static ISO_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:?\d{2})?")
        .unwrap_or_else(|_| unreachable!())
});

/// `YYYY-MM-DD HH:MM:SS` timestamp embedded in free text.
static SPACED_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}").unwrap_or_else(|_| unreachable!())
});

/// Result of trying to read a line as a structured record.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRecord {
    /// A JSON object with all required fields present and non-null.
    Structured {
        /// Source level, not yet normalized
        level: String,
        /// Source message, not yet cleaned
        message: String,
        /// Source timestamp value
        timestamp: Value,
    },
    /// Not JSON, not an object, or missing a required field.
    Unparseable,
}

impl ParsedRecord {
    /// Classifies a single line.
    #[must_use]
    pub fn from_line(line: &str) -> Self {
        let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(line.trim()) else {
            return Self::Unparseable;
        };

        let field = |key: &str| obj.get(key).filter(|v| !v.is_null());
        match (field("level"), field("message"), field("timestamp")) {
            (Some(level), Some(message), Some(timestamp)) => Self::Structured {
                level: value_text(level),
                message: value_text(message),
                timestamp: timestamp.clone(),
            },
            _ => Self::Unparseable,
        }
    }
}

/// Renders a JSON value as text; strings are taken verbatim.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parses one line into an entry.
#[must_use]
pub fn parse_line(line: &str, source_file: &str, line_number: usize) -> LogEntry {
    let id = LogEntry::make_id(source_file, line_number);

    match ParsedRecord::from_line(line) {
        ParsedRecord::Structured {
            level,
            message,
            timestamp,
        } => LogEntry {
            id,
            level: LogLevel::normalize(&level),
            message: clean_message(&message),
            timestamp: parse_timestamp_value(&timestamp).unwrap_or_else(Utc::now),
            source_file: source_file.to_string(),
            line_number,
            raw: line.to_string(),
            is_structured: true,
        },
        ParsedRecord::Unparseable => LogEntry {
            id,
            level: infer_level(source_file, line),
            message: line.trim().to_string(),
            timestamp: find_timestamp(line).unwrap_or_else(Utc::now),
            source_file: source_file.to_string(),
            line_number,
            raw: line.to_string(),
            is_structured: false,
        },
    }
}

/// Parses file content, skipping blank lines.
///
/// Line numbers count only the retained lines, starting at 1.
#[must_use]
pub fn parse_content(content: &str, source_file: &str) -> Vec<LogEntry> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| parse_line(line, source_file, i + 1))
        .collect()
}

/// Reads and parses a file. An unreadable file yields no entries.
#[must_use]
pub fn parse_file<F>(fs: &F, path: &Path) -> Vec<LogEntry>
where
    F: FileSystem + ?Sized,
{
    match fs.read_to_string(path) {
        Ok(content) => parse_content(&content, &path.to_string_lossy()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read log file, skipping");
            Vec::new()
        }
    }
}

/// Strips ANSI colour sequences and surrounding whitespace.
#[must_use]
pub fn clean_message(message: &str) -> String {
    ANSI_REGEX.replace_all(message, "").trim().to_string()
}

/// Parses a structured timestamp: ISO-8601 first, then epoch seconds.
#[must_use]
pub fn parse_timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_iso8601(s).or_else(|| parse_epoch_seconds(s)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
        _ => None,
    }
}

/// Parses ISO-8601 text, with either `T` or a space between date and time.
/// Offset-less forms are taken as UTC.
#[must_use]
pub fn parse_iso8601(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_epoch_seconds(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
}

/// Infers a level for an unstructured line.
///
/// The file name wins over the line text.
#[must_use]
pub fn infer_level(source_file: &str, line: &str) -> LogLevel {
    let name = Path::new(source_file)
        .file_name()
        .map_or_else(|| source_file.to_lowercase(), |n| n.to_string_lossy().to_lowercase());
    if name.contains("error") {
        return LogLevel::Error;
    }
    if name.contains("debug") {
        return LogLevel::Debug;
    }

    let text = line.to_lowercase();
    if text.contains("err") {
        LogLevel::Error
    } else if text.contains("warn") {
        LogLevel::Warning
    } else if text.contains("info") {
        LogLevel::Info
    } else if text.contains("debug") {
        LogLevel::Debug
    } else {
        LogLevel::Unknown
    }
}

/// Finds a timestamp inside free text.
#[must_use]
pub fn find_timestamp(line: &str) -> Option<DateTime<Utc>> {
    let iso = ISO_TIMESTAMP_REGEX
        .find_iter(line)
        .find_map(|m| parse_iso8601(m.as_str()));
    iso.or_else(|| {
        SPACED_TIMESTAMP_REGEX.find(line).and_then(|m| {
            NaiveDateTime::parse_from_str(m.as_str(), "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
    })
}
