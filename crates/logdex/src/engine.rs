//! The index engine: refresh and query entry points.
//!
//! [`LogIndexEngine`] owns the currently published [`Snapshot`]. The state is
//! either [`IndexState::Empty`] (nothing built yet) or
//! [`IndexState::Ready`]. Refresh builds a new snapshot off to the side and
//! publishes it by swapping one `Arc`; readers that already hold the old
//! snapshot keep using it undisturbed.
//!
//! ```text
//!            query / ensure_loaded          refresh
//!  ┌───────┐ ─────────────────────► ┌───────┐ ◄──┐
//!  │ Empty │                        │ Ready │    │ swap Arc<Snapshot>
//!  └───────┘ ─────── refresh ─────► └───────┘ ───┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::config::LogdexConfig;
use crate::error::{LogdexError, Result};
use crate::fs::{FileSystem, OsFileSystem};
use crate::index::Snapshot;
use crate::parser::parse_file;
use crate::query::{execute, ResultPage, SearchRequest};
use crate::scanner::scan_directories;
use crate::types::{IndexStats, IndexStatus, LogEntry, LogFileMeta, RefreshSummary};

/// Publication state of the index.
#[derive(Debug, Clone, Default)]
pub enum IndexState {
    /// No snapshot has been built yet.
    #[default]
    Empty,
    /// A snapshot is published.
    Ready(Arc<Snapshot>),
}

impl IndexState {
    /// Returns the status tag of this state.
    #[must_use]
    pub const fn status(&self) -> IndexStatus {
        match self {
            Self::Empty => IndexStatus::Empty,
            Self::Ready(_) => IndexStatus::Ready,
        }
    }
}

/// Runs the ingestion pipeline: scan, parse every file, index.
///
/// Files are parsed in scan order (newest first). Per-directory and per-file
/// failures are logged and skipped.
#[must_use]
pub fn build_snapshot<F>(fs: &F, directories: &[PathBuf]) -> Snapshot
where
    F: FileSystem + ?Sized,
{
    let files = scan_directories(fs, directories);
    let mut entries: Vec<LogEntry> = Vec::new();

    for file in &files {
        let parsed = parse_file(fs, &file.path);
        debug!(file = %file.path.display(), entries = parsed.len(), "parsed log file");
        entries.extend(parsed);
    }

    Snapshot::build(entries, files)
}

/// Thread-safe log index with atomic snapshot publication.
pub struct LogIndexEngine {
    config: LogdexConfig,
    fs: Arc<dyn FileSystem>,
    state: RwLock<IndexState>,
    /// Serializes refreshes so concurrent callers never rebuild in parallel.
    refresh_lock: Mutex<()>,
}

impl LogIndexEngine {
    /// Creates an engine reading from the local file system.
    ///
    /// # Errors
    ///
    /// Returns [`LogdexError::NoDirectories`] if the config names no
    /// directories, or [`LogdexError::InvalidConfig`] for bad page sizes.
    pub fn new(config: LogdexConfig) -> Result<Self> {
        Self::with_file_system(config, Arc::new(OsFileSystem))
    }

    /// Creates an engine over a custom [`FileSystem`].
    ///
    /// # Errors
    ///
    /// Same as [`LogIndexEngine::new`].
    pub fn with_file_system(config: LogdexConfig, fs: Arc<dyn FileSystem>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fs,
            state: RwLock::new(IndexState::Empty),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &LogdexConfig {
        &self.config
    }

    /// Returns whether a snapshot has been published.
    #[must_use]
    pub fn status(&self) -> IndexStatus {
        self.state.read().status()
    }

    /// Returns the published snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        match &*self.state.read() {
            IndexState::Empty => None,
            IndexState::Ready(snapshot) => Some(Arc::clone(snapshot)),
        }
    }

    /// Rebuilds the index from `directories` and publishes it.
    ///
    /// Safe to call repeatedly; concurrent calls run one after another.
    pub fn refresh(&self, directories: &[PathBuf]) -> RefreshSummary {
        let _guard = self.refresh_lock.lock();
        self.rebuild_locked(directories)
    }

    /// Rebuilds the index from the configured directories.
    pub fn refresh_configured(&self) -> RefreshSummary {
        self.refresh(&self.config.directories)
    }

    /// Runs [`LogIndexEngine::refresh_configured`] on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns [`LogdexError::RefreshTask`] if the task panics or is cancelled.
    pub async fn refresh_in_background(self: &Arc<Self>) -> Result<RefreshSummary> {
        let engine = Arc::clone(self);
        tokio::task::spawn_blocking(move || engine.refresh_configured())
            .await
            .map_err(|e| LogdexError::RefreshTask(e.to_string()))
    }

    /// Returns the published snapshot, building one first if none exists.
    pub fn ensure_loaded(&self) -> Arc<Snapshot> {
        if let Some(snapshot) = self.snapshot() {
            return snapshot;
        }

        let _guard = self.refresh_lock.lock();
        // Another caller may have built it while we waited.
        if let Some(snapshot) = self.snapshot() {
            return snapshot;
        }
        debug!("index empty, building on first use");
        self.rebuild_locked(&self.config.directories);
        self.snapshot().unwrap_or_else(|| Arc::new(Snapshot::empty()))
    }

    /// Answers a query against the published snapshot.
    #[must_use]
    pub fn query(&self, request: &SearchRequest) -> ResultPage {
        let snapshot = self.ensure_loaded();
        execute(
            &snapshot,
            request,
            self.config.default_page_size,
            self.config.max_page_size,
        )
    }

    /// Looks up an entry by id in the published snapshot.
    #[must_use]
    pub fn entry(&self, id: &str) -> Option<LogEntry> {
        self.snapshot()?.find(id).cloned()
    }

    /// Files that went into the published snapshot, newest first.
    #[must_use]
    pub fn files(&self) -> Vec<LogFileMeta> {
        self.snapshot()
            .map(|snapshot| snapshot.files().to_vec())
            .unwrap_or_default()
    }

    /// Scans the configured directories without touching the index.
    #[must_use]
    pub fn list_files(&self) -> Vec<LogFileMeta> {
        scan_directories(self.fs.as_ref(), &self.config.directories)
    }

    /// Summarizes the published snapshot.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        match self.snapshot() {
            None => IndexStats {
                status: IndexStatus::Empty,
                entry_count: 0,
                file_count: 0,
                term_count: 0,
                structured_count: 0,
                built_at: None,
            },
            Some(snapshot) => IndexStats {
                status: IndexStatus::Ready,
                entry_count: snapshot.len(),
                file_count: snapshot.files().len(),
                term_count: snapshot.term_count(),
                structured_count: snapshot
                    .entries()
                    .iter()
                    .filter(|e| e.is_structured)
                    .count(),
                built_at: Some(snapshot.built_at()),
            },
        }
    }

    /// Builds and publishes. Caller must hold `refresh_lock`.
    fn rebuild_locked(&self, directories: &[PathBuf]) -> RefreshSummary {
        let started = Instant::now();
        let snapshot = Arc::new(build_snapshot(self.fs.as_ref(), directories));

        let summary = RefreshSummary {
            entry_count: snapshot.len(),
            file_count: snapshot.files().len(),
            built_at: snapshot.built_at(),
        };

        *self.state.write() = IndexState::Ready(snapshot);

        info!(
            entries = summary.entry_count,
            files = summary.file_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "log index refreshed"
        );
        summary
    }
}

impl std::fmt::Debug for LogIndexEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogIndexEngine")
            .field("config", &self.config)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

/// Shared engine handle.
pub type SharedEngine = Arc<LogIndexEngine>;
