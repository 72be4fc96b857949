//! Search command implementation.
//!
//! Translates command-line flags into a [`SearchRequest`]:
//! - positional terms are OR-combined
//! - `--since`/`--until` accept ISO-8601 dates or timestamps
//! - unknown sort fields and orders fall back to the defaults

use std::io::Write;

use chrono::{DateTime, Utc};
use logdex::parser::parse_iso8601;
use logdex::{
    QueryFilters, SearchRequest, SharedEngine, SortField, SortOrder, SortSpec,
};

use crate::cli::SearchArgs;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Search command executor.
pub struct SearchCommand {
    engine: SharedEngine,
}

impl SearchCommand {
    /// Create a new search command.
    #[must_use]
    pub const fn new(engine: SharedEngine) -> Self {
        Self { engine }
    }

    /// Execute the search command.
    ///
    /// # Errors
    ///
    /// Returns an error if a date flag cannot be parsed or output fails.
    pub fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &SearchArgs,
    ) -> Result<(), CliError> {
        let request = build_request(args)?;
        let page = self.engine.query(&request);
        format.write(writer, &page)
    }
}

/// Builds a [`SearchRequest`] from parsed arguments.
///
/// A page size of 0 stands for the configured default.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] for unparseable dates.
pub fn build_request(args: &SearchArgs) -> Result<SearchRequest, CliError> {
    let mut filters = QueryFilters::new();
    if let Some(level) = &args.level {
        filters = filters.with_level(level.as_str());
    }
    if let Some(since) = &args.since {
        filters = filters.with_start_date(parse_date("since", since)?);
    }
    if let Some(until) = &args.until {
        filters = filters.with_end_date(parse_date("until", until)?);
    }
    if let Some(source) = &args.source {
        filters = filters.with_source_file(source.as_str());
    }

    let sort = SortSpec::new(
        SortField::parse_or_default(&args.sort),
        SortOrder::parse_or_default(&args.order),
    );

    Ok(SearchRequest::new(args.text.join(" "))
        .with_filters(filters)
        .with_sort(sort)
        .with_page(args.page, args.page_size.unwrap_or(0)))
}

fn parse_date(flag: &str, value: &str) -> Result<DateTime<Utc>, CliError> {
    parse_iso8601(value).ok_or_else(|| {
        CliError::InvalidArgument(format!("--{flag}: cannot parse date '{value}'"))
    })
}
