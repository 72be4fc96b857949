//! Log file discovery.
//!
//! Only files directly under a configured directory whose name matches
//! `^(debug|error)(\d+)?\.log$` are considered. Directories that cannot be
//! listed are skipped with a warning.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::fs::FileSystem;
use crate::types::{LogFileMeta, LogLevel};

/// Regex for log file names.
static LOG_FILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(debug|error)(\d+)?\.log$").unwrap_or_else(|_| unreachable!()));

/// Returns true if `name` is a log file name this crate ingests.
#[must_use]
pub fn is_log_file_name(name: &str) -> bool {
    LOG_FILE_REGEX.is_match(name)
}

/// Scans `directories` for log files, newest first.
///
/// A file reached through more than one configured directory is listed once.
#[must_use]
pub fn scan_directories<F>(fs: &F, directories: &[PathBuf]) -> Vec<LogFileMeta>
where
    F: FileSystem + ?Sized,
{
    let mut seen = HashSet::new();
    let mut files: Vec<LogFileMeta> = directories
        .iter()
        .flat_map(|dir| scan_directory(fs, dir))
        .filter(|file| seen.insert(file.path.clone()))
        .collect();

    files.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.path.cmp(&b.path))
    });
    files
}

/// Scans a single directory. An unlistable directory yields nothing.
#[must_use]
pub fn scan_directory<F>(fs: &F, dir: &Path) -> Vec<LogFileMeta>
where
    F: FileSystem + ?Sized,
{
    let stats = match fs.list_dir(dir) {
        Ok(stats) => stats,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot read log directory, skipping");
            return Vec::new();
        }
    };

    let files: Vec<LogFileMeta> = stats
        .into_iter()
        .filter(|stat| stat.is_file)
        .filter_map(|stat| {
            let name = stat.path.file_name()?.to_str()?.to_string();
            if !is_log_file_name(&name) {
                return None;
            }
            let level = if name.starts_with("debug") {
                LogLevel::Debug
            } else {
                LogLevel::Error
            };
            let directory = stat
                .path
                .parent()
                .map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
            Some(LogFileMeta {
                name,
                path: stat.path,
                size: stat.size,
                modified: stat.modified,
                level,
                directory,
            })
        })
        .collect();

    debug!(dir = %dir.display(), count = files.len(), "scanned log directory");
    files
}
