//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use logdex::LogdexConfig;

use crate::error::CliError;

/// logdex - search flat-file debug and error logs.
#[derive(Parser, Debug, Clone)]
#[command(name = "logdex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log directory to scan (repeatable, or comma-separated).
    #[arg(short, long = "dir", env = "LOGDEX_DIRS", value_delimiter = ',')]
    pub dirs: Vec<PathBuf>,

    /// JSON config file.
    #[arg(short, long, env = "LOGDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Resolves the index configuration.
    ///
    /// `--dir` values replace the directories from the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded.
    pub fn load_config(&self) -> Result<LogdexConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => LogdexConfig::from_json_file(path).map_err(|e| {
                CliError::Config(format!("cannot load {}: {e}", path.display()))
            })?,
            None => LogdexConfig::default(),
        };
        if !self.dirs.is_empty() {
            config.directories.clone_from(&self.dirs);
        }
        Ok(config)
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List discovered log files.
    Files,

    /// Rebuild the index and report what was loaded.
    Refresh,

    /// Show index statistics.
    Stats,

    /// Search log entries.
    Search(SearchArgs),

    /// Show a single entry by id (for example `error.log:12`).
    Show {
        /// Entry id.
        id: String,
    },
}

/// Arguments for the search command.
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Search terms; an entry matching any term is returned.
    pub text: Vec<String>,

    /// Only entries with this level.
    #[arg(short, long)]
    pub level: Option<String>,

    /// Only entries at or after this time (ISO-8601).
    #[arg(long)]
    pub since: Option<String>,

    /// Only entries at or before this time (ISO-8601).
    #[arg(long)]
    pub until: Option<String>,

    /// Only entries whose source file path contains this text.
    #[arg(short, long)]
    pub source: Option<String>,

    /// Page number, starting at 1.
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Entries per page.
    #[arg(short = 'n', long)]
    pub page_size: Option<usize>,

    /// Field to sort by.
    #[arg(long, default_value = "timestamp")]
    pub sort: String,

    /// Sort order (asc or desc).
    #[arg(long, default_value = "desc")]
    pub order: String,
}
