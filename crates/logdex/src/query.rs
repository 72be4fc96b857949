//! Search, filtering, sorting and pagination over a [`Snapshot`].
//!
//! This module provides:
//! - [`SearchRequest`] - Query text, [`QueryFilters`], [`SortSpec`], [`Pagination`]
//! - [`ResultPage`] - One page of entries plus [`PageInfo`] and [`SearchInfo`]
//! - [`execute`] - Runs a request against a snapshot
//!
//! Malformed paging or sort input is clamped, never rejected.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::index::Snapshot;
use crate::types::{LogEntry, LogLevel};

/// Page size used when none (or zero) is requested.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Largest page size a request may ask for.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Filter criteria. Every present filter must pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilters {
    /// Exact level, compared after normalization
    #[serde(default)]
    pub level: Option<String>,
    /// Inclusive lower bound on the timestamp
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the timestamp
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Substring of the source file path
    #[serde(default)]
    pub source_file: Option<String>,
}

impl QueryFilters {
    /// Creates a filter set that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a level filter.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Adds an inclusive lower time bound.
    #[must_use]
    pub const fn with_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Adds an inclusive upper time bound.
    #[must_use]
    pub const fn with_end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Adds a source file substring filter.
    #[must_use]
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    /// Checks if an entry passes every present filter.
    #[must_use]
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if let Some(ref level) = self.level {
            if entry.level != LogLevel::normalize(level) {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if entry.timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if entry.timestamp > end {
                return false;
            }
        }
        if let Some(ref source) = self.source_file {
            if !entry.source_file.contains(source.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Field to sort results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Entry timestamp
    #[default]
    Timestamp,
    /// Normalized level name
    Level,
    /// Cleaned message
    Message,
    /// Source file path
    SourceFile,
    /// Line number within the source file
    LineNumber,
    /// Entry id
    Id,
    /// Structured flag
    IsStructured,
}

impl SortField {
    /// Parses a field name, falling back to [`SortField::Timestamp`].
    ///
    /// Accepts both `snake_case` and `camelCase` spellings.
    #[must_use]
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    fn key(self, entry: &LogEntry) -> SortKey<'_> {
        match self {
            Self::Timestamp => SortKey::Time(entry.timestamp),
            Self::Level => SortKey::Text(entry.level.as_str()),
            Self::Message => SortKey::Text(&entry.message),
            Self::SourceFile => SortKey::Text(&entry.source_file),
            Self::LineNumber => SortKey::Number(entry.line_number as u64),
            Self::Id => SortKey::Text(&entry.id),
            Self::IsStructured => SortKey::Flag(entry.is_structured),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "timestamp" => Ok(Self::Timestamp),
            "level" => Ok(Self::Level),
            "message" => Ok(Self::Message),
            "source_file" | "sourceFile" => Ok(Self::SourceFile),
            "line_number" | "lineNumber" => Ok(Self::LineNumber),
            "id" => Ok(Self::Id),
            "is_structured" | "isStructured" => Ok(Self::IsStructured),
            other => Err(format!("unknown sort field: {other}")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first
    Asc,
    /// Largest first
    #[default]
    Desc,
}

impl SortOrder {
    /// Parses `asc`/`desc` (any case), falling back to [`SortOrder::Desc`].
    #[must_use]
    pub fn parse_or_default(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Self::Asc,
            _ => Self::Desc,
        }
    }
}

/// Sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort by
    #[serde(default)]
    pub field: SortField,
    /// Direction
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    /// Creates a sort specification.
    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

/// Requested page. Values are clamped when executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number
    pub page: usize,
    /// Entries per page
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Creates a pagination request.
    #[must_use]
    pub const fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    /// Returns a copy with page >= 1 and `1 <= page_size <= max_page_size`.
    #[must_use]
    pub fn clamped(self, default_page_size: usize, max_page_size: usize) -> Self {
        let max_page_size = max_page_size.max(1);
        let page_size = if self.page_size == 0 {
            default_page_size.max(1)
        } else {
            self.page_size
        };
        Self {
            page: self.page.max(1),
            page_size: page_size.min(max_page_size),
        }
    }
}

/// A full query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free text; empty matches everything
    #[serde(default)]
    pub text: String,
    /// Filters applied after text search
    #[serde(default)]
    pub filters: QueryFilters,
    /// Sort specification
    #[serde(default)]
    pub sort: SortSpec,
    /// Page to return
    #[serde(default)]
    pub pagination: Pagination,
}

impl SearchRequest {
    /// Creates a request for `text` with default filters, sort and paging.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the filters.
    #[must_use]
    pub fn with_filters(mut self, filters: QueryFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the sort specification.
    #[must_use]
    pub const fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the page.
    #[must_use]
    pub const fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.pagination = Pagination::new(page, page_size);
        self
    }
}

/// Pagination metadata of a result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page returned (after clamping)
    pub current_page: usize,
    /// `ceil(total_count / page_size)`
    pub total_pages: usize,
    /// Matches before slicing
    pub total_count: usize,
    /// Page size used (after clamping)
    pub page_size: usize,
    /// A later page exists
    pub has_next_page: bool,
    /// An earlier page exists
    pub has_previous_page: bool,
}

/// Search metadata of a result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInfo {
    /// The query text as given
    pub query: String,
    /// Build time of the snapshot that answered
    pub index_built_at: DateTime<Utc>,
    /// Number of matching entries
    pub result_count: usize,
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Entries on this page
    pub entries: Vec<LogEntry>,
    /// Pagination metadata
    pub pagination: PageInfo,
    /// Search metadata
    pub search: SearchInfo,
}

/// Sort key of one entry.
enum SortKey<'a> {
    Time(DateTime<Utc>),
    Text(&'a str),
    Number(u64),
    Flag(bool),
}

impl SortKey<'_> {
    fn as_text(&self) -> String {
        match self {
            Self::Time(t) => t.to_rfc3339(),
            Self::Text(s) => (*s).to_string(),
            Self::Number(n) => n.to_string(),
            Self::Flag(b) => b.to_string(),
        }
    }
}

/// Case-folded comparison, then byte order so distinct strings never tie.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_keys(a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
    match (a, b) {
        (SortKey::Time(x), SortKey::Time(y)) => x.cmp(y),
        (SortKey::Text(x), SortKey::Text(y)) => compare_text(x, y),
        (SortKey::Number(x), SortKey::Number(y)) => x.cmp(y),
        (SortKey::Flag(x), SortKey::Flag(y)) => x.cmp(y),
        _ => compare_text(&a.as_text(), &b.as_text()),
    }
}

/// Stably sorts entries; ties keep their incoming order in both directions.
pub fn sort_entries(entries: &mut [&LogEntry], sort: SortSpec) {
    entries.sort_by(|a, b| {
        let ordering = compare_keys(&sort.field.key(a), &sort.field.key(b));
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Runs `request` against `snapshot`.
#[must_use]
pub fn execute(
    snapshot: &Snapshot,
    request: &SearchRequest,
    default_page_size: usize,
    max_page_size: usize,
) -> ResultPage {
    let mut matches: Vec<&LogEntry> = if request.text.trim().is_empty() {
        snapshot.entries().iter().collect()
    } else {
        snapshot
            .search(&request.text)
            .into_iter()
            .filter_map(|position| snapshot.entry(position))
            .collect()
    };

    matches.retain(|entry| request.filters.matches(entry));
    sort_entries(&mut matches, request.sort);

    let paging = request.pagination.clamped(default_page_size, max_page_size);
    let total_count = matches.len();
    let total_pages = total_count.div_ceil(paging.page_size);
    let start = (paging.page - 1).saturating_mul(paging.page_size);

    let entries: Vec<LogEntry> = matches
        .into_iter()
        .skip(start)
        .take(paging.page_size)
        .cloned()
        .collect();

    ResultPage {
        entries,
        pagination: PageInfo {
            current_page: paging.page,
            total_pages,
            total_count,
            page_size: paging.page_size,
            has_next_page: paging.page < total_pages,
            has_previous_page: paging.page > 1,
        },
        search: SearchInfo {
            query: request.text.clone(),
            index_built_at: snapshot.built_at(),
            result_count: total_count,
        },
    }
}
