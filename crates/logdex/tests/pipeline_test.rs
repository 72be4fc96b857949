//! End-to-end tests: real files on disk through refresh and query.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use logdex::{
    IndexStatus, LogIndexEngine, LogLevel, LogdexConfig, LogdexError, QueryFilters,
    SearchRequest, SortField, SortOrder, SortSpec,
};

fn write_log(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write log");
    path
}

fn engine_for(dirs: &[&Path]) -> LogIndexEngine {
    let config = LogdexConfig::new(dirs.iter().map(|d| d.to_path_buf()));
    LogIndexEngine::new(config).expect("engine")
}

#[test]
fn structured_error_file_scenario() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_log(
        dir.path(),
        "error.log",
        r#"{"level":"error","message":"Database down","timestamp":"2025-01-20T10:05:00.000Z"}"#,
    );

    let engine = engine_for(&[dir.path()]);
    let summary = engine.refresh_configured();
    assert_eq!(summary.entry_count, 1);
    assert_eq!(summary.file_count, 1);

    let page = engine.query(&SearchRequest::new(""));
    assert_eq!(page.entries.len(), 1);
    let entry = &page.entries[0];
    assert_eq!(entry.level, LogLevel::Error);
    assert!(entry.is_structured);
    assert_eq!(entry.id, "error.log:1");
    assert!(Path::new(&entry.source_file).is_absolute());
}

#[test]
fn debug_file_name_beats_content_level() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_log(dir.path(), "debug.log", "2025-01-20 10:00:00 INFO User logged in\n");

    let engine = engine_for(&[dir.path()]);
    let page = engine.query(&SearchRequest::new("user"));

    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries[0].level, LogLevel::Debug);
    assert!(!page.entries[0].is_structured);
}

#[test]
fn only_matching_file_names_are_indexed() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_log(dir.path(), "error3.log", "kept\n");
    write_log(dir.path(), "access.log", "ignored\n");
    write_log(dir.path(), "error.log.bak", "ignored\n");
    fs::create_dir(dir.path().join("debug.log")).expect("mkdir");
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).expect("mkdir");
    write_log(&nested, "error.log", "too deep\n");

    let engine = engine_for(&[dir.path()]);
    let summary = engine.refresh_configured();
    assert_eq!(summary.file_count, 1);
    assert_eq!(summary.entry_count, 1);
    assert_eq!(engine.list_files()[0].name, "error3.log");
}

#[test]
fn same_directory_twice_indexes_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_log(dir.path(), "error.log", "one\n");

    let engine = engine_for(&[dir.path(), dir.path()]);
    let summary = engine.refresh_configured();
    assert_eq!(summary.file_count, 1);
    assert_eq!(summary.entry_count, 1);
    assert_eq!(engine.list_files().len(), 1);
}

#[test]
fn missing_directory_does_not_abort_refresh() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_log(dir.path(), "error.log", "one\ntwo\n");
    let missing = dir.path().join("does-not-exist");

    let engine = engine_for(&[missing.as_path(), dir.path()]);
    let summary = engine.refresh_configured();
    assert_eq!(summary.entry_count, 2);
}

#[test]
fn refresh_picks_up_new_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_log(dir.path(), "debug.log", "first\n");

    let engine = engine_for(&[dir.path()]);
    assert_eq!(engine.refresh_configured().entry_count, 1);
    assert_eq!(engine.refresh_configured().entry_count, 1);

    fs::write(&path, "first\nsecond\n\nthird\n").expect("rewrite");
    assert_eq!(engine.refresh_configured().entry_count, 3);
    assert_eq!(engine.entry("debug.log:3").map(|e| e.message), Some("third".to_string()));
}

#[test]
fn or_search_across_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_log(
        dir.path(),
        "debug.log",
        "cache warmed\nDatabase pool ready\nscheduler tick\n",
    );

    let engine = engine_for(&[dir.path()]);
    let request = SearchRequest::new("cache scheduler")
        .with_sort(SortSpec::new(SortField::LineNumber, SortOrder::Asc));
    let page = engine.query(&request);

    let ids: Vec<&str> = page.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["debug.log:1", "debug.log:3"]);
}

#[test]
fn empty_level_result_is_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_log(dir.path(), "debug.log", "all quiet\n");

    let engine = engine_for(&[dir.path()]);
    let request = SearchRequest::new("").with_filters(QueryFilters::new().with_level("error"));
    let page = engine.query(&request);

    assert_eq!(page.pagination.total_count, 0);
    assert!(page.entries.is_empty());
}

#[test]
fn paging_walks_every_entry_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let content: String = (0..23).map(|i| format!("line {i}\n")).collect();
    write_log(dir.path(), "error.log", &content);

    let engine = engine_for(&[dir.path()]);
    let mut seen = Vec::new();
    let mut page_number = 1;
    loop {
        let page = engine.query(&SearchRequest::new("").with_page(page_number, 5));
        assert_eq!(page.pagination.total_pages, 5);
        seen.extend(page.entries.iter().map(|e| e.id.clone()));
        if !page.pagination.has_next_page {
            break;
        }
        page_number += 1;
    }

    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 23);
}

#[test]
fn no_directories_is_a_construction_error() {
    let result = LogIndexEngine::new(LogdexConfig::default());
    assert!(matches!(result, Err(LogdexError::NoDirectories)));
}

#[tokio::test]
async fn background_refresh_publishes_snapshot() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_log(dir.path(), "error.log", "boom\n");

    let engine = Arc::new(engine_for(&[dir.path()]));
    assert_eq!(engine.status(), IndexStatus::Empty);

    let summary = engine.refresh_in_background().await.expect("refresh");
    assert_eq!(summary.entry_count, 1);
    assert_eq!(engine.status(), IndexStatus::Ready);
}
