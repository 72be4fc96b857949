//! # logdex-cli
//!
//! Command-line front end for the `logdex` log index.
//!
//! Provides commands for:
//! - Listing discovered `debug*.log` / `error*.log` files
//! - Rebuilding the index
//! - Searching with filters, sorting and paging
//! - Inspecting a single entry and index statistics
//!
//! Directories come from `--dir` (or `LOGDEX_DIRS`) and an optional JSON
//! config file given with `--config`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format, SearchArgs};
pub use error::CliError;
pub use output::OutputFormat;
