//! # logdex
//!
//! Discovers flat-file logs, parses them into a uniform entry model, builds an
//! in-memory inverted index and answers filtered, sorted, paginated queries.
//!
//! This crate provides:
//!
//! - [`scanner`] - Finds `debug*.log` / `error*.log` files in directories
//! - [`parser`] - Turns lines into [`LogEntry`] values (JSON or heuristic)
//! - [`index`] - Tokenizer and immutable [`Snapshot`]
//! - [`query`] - Text search, filters, stable sort and pagination
//! - [`LogIndexEngine`] - Refresh/query entry points with atomic publication
//!
//! ```text
//! Scanner ──► Parser ──► Snapshot::build ──► publish (Arc swap)
//!                                               │
//!                               query ◄─────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use logdex::{LogIndexEngine, LogdexConfig, QueryFilters, SearchRequest};
//!
//! let engine = LogIndexEngine::new(LogdexConfig::new(["/var/log/myapp"]))?;
//! engine.refresh_configured();
//!
//! let request = SearchRequest::new("database timeout")
//!     .with_filters(QueryFilters::new().with_level("error"))
//!     .with_page(1, 20);
//! let page = engine.query(&request);
//! println!("{} matches", page.pagination.total_count);
//! # Ok::<(), logdex::LogdexError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod fs;
pub mod index;
pub mod parser;
pub mod query;
pub mod scanner;
pub mod types;

// Re-export main types
pub use config::LogdexConfig;
pub use engine::{build_snapshot, IndexState, LogIndexEngine, SharedEngine};
pub use error::{LogdexError, Result};
pub use fs::{FileStat, FileSystem, OsFileSystem};
pub use index::{tokenize, Snapshot};
pub use parser::{parse_content, parse_line, ParsedRecord};
pub use query::{
    PageInfo, Pagination, QueryFilters, ResultPage, SearchInfo, SearchRequest, SortField,
    SortOrder, SortSpec,
};
pub use scanner::scan_directories;
pub use types::{IndexStats, IndexStatus, LogEntry, LogFileMeta, LogLevel, RefreshSummary};
