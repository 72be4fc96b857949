//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use logdex::{IndexStats, IndexStatus, LogEntry, LogFileMeta, RefreshSummary, ResultPage};
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Discovered log files for display.
#[derive(Debug, Clone, Serialize)]
pub struct FileList {
    /// Files, newest first.
    pub files: Vec<LogFileMeta>,
}

impl TableDisplay for FileList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.files.is_empty() {
            writeln!(writer, "No log files found")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<20}  {:<7}  {:>10}  {:<20}  {}",
            "NAME", "LEVEL", "SIZE", "MODIFIED", "DIRECTORY"
        )?;
        writeln!(writer, "{}", "─".repeat(90))?;

        for file in &self.files {
            writeln!(
                writer,
                "{:<20}  {:<7}  {:>10}  {:<20}  {}",
                truncate(&file.name, 20),
                file.level,
                file.size,
                file.modified.format("%Y-%m-%d %H:%M:%S"),
                file.directory.display()
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Total: {} file(s)", self.files.len())?;
        Ok(())
    }
}

impl TableDisplay for RefreshSummary {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Index refreshed")?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "Files:            {}", self.file_count)?;
        writeln!(writer, "Entries:          {}", self.entry_count)?;
        writeln!(writer, "Built at:         {}", self.built_at.to_rfc3339())?;
        Ok(())
    }
}

impl TableDisplay for IndexStats {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let status = match self.status {
            IndexStatus::Empty => "empty",
            IndexStatus::Ready => "ready",
        };
        writeln!(writer, "Index Status")?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "State:            {status}")?;
        writeln!(writer, "Files:            {}", self.file_count)?;
        writeln!(writer, "Entries:          {}", self.entry_count)?;
        writeln!(writer, "  Structured:     {}", self.structured_count)?;
        writeln!(writer, "Terms:            {}", self.term_count)?;
        if let Some(built_at) = self.built_at {
            writeln!(writer, "Built at:         {}", built_at.to_rfc3339())?;
        }
        Ok(())
    }
}

impl TableDisplay for ResultPage {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.entries.is_empty() {
            writeln!(writer, "No matching entries")?;
        } else {
            writeln!(
                writer,
                "{:<20}  {:<7}  {:<16}  {}",
                "TIMESTAMP", "LEVEL", "ID", "MESSAGE"
            )?;
            writeln!(writer, "{}", "─".repeat(100))?;

            for entry in &self.entries {
                writeln!(
                    writer,
                    "{:<20}  {:<7}  {:<16}  {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    truncate(entry.level.as_str(), 7),
                    truncate(&entry.id, 16),
                    truncate(&entry.message, 80)
                )?;
            }
        }

        let page = &self.pagination;
        writeln!(writer)?;
        writeln!(
            writer,
            "Page {}/{} ({} match(es), {} per page)",
            page.current_page, page.total_pages, page.total_count, page.page_size
        )?;
        Ok(())
    }
}

impl TableDisplay for LogEntry {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Entry: {}", self.id)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "Level:            {}", self.level)?;
        writeln!(writer, "Timestamp:        {}", self.timestamp.to_rfc3339())?;
        writeln!(writer, "Source:           {}:{}", self.source_file, self.line_number)?;
        writeln!(writer, "Structured:       {}", if self.is_structured { "yes" } else { "no" })?;
        writeln!(writer)?;
        writeln!(writer, "{}", self.message)?;
        if self.raw != self.message {
            writeln!(writer)?;
            writeln!(writer, "Raw:")?;
            writeln!(writer, "{}", self.raw)?;
        }
        Ok(())
    }
}

/// Truncates to at most `max_len` characters, marking the cut with `...`.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
