//! Inverted term index and immutable snapshots.
//!
//! This module provides:
//! - [`tokenize`] - Lower-cased word tokens of at least two characters
//! - [`Snapshot`] - Entries plus the term → position map built from them
//!
//! A snapshot is never modified after [`Snapshot::build`] returns. Refresh
//! builds a fresh one and swaps it in.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::types::{LogEntry, LogFileMeta};

/// Minimum token length kept by the tokenizer, in characters.
pub const MIN_TOKEN_LEN: usize = 2;

/// Tokenizes text into lowercase word tokens.
///
/// Word characters are alphanumerics and `_`; everything else separates.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.chars().count() >= MIN_TOKEN_LEN)
        .map(String::from)
        .collect()
}

/// The searchable text of an entry.
fn entry_blob(entry: &LogEntry) -> String {
    format!(
        "{} {} {} {}",
        entry.message,
        entry.level.as_str(),
        entry.source_file,
        entry.raw
    )
}

/// An immutable index generation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Entries in file-scan order
    entries: Vec<LogEntry>,
    /// Term → positions into `entries`
    terms: HashMap<String, BTreeSet<usize>>,
    /// Files the entries were read from
    files: Vec<LogFileMeta>,
    /// When this snapshot was built
    built_at: DateTime<Utc>,
}

impl Snapshot {
    /// Builds a snapshot over `entries`, keeping their order.
    #[must_use]
    pub fn build(entries: Vec<LogEntry>, files: Vec<LogFileMeta>) -> Self {
        let mut terms: HashMap<String, BTreeSet<usize>> = HashMap::new();

        for (position, entry) in entries.iter().enumerate() {
            for token in tokenize(&entry_blob(entry)) {
                terms.entry(token).or_default().insert(position);
            }
        }

        Self {
            entries,
            terms,
            files,
            built_at: Utc::now(),
        }
    }

    /// Creates a snapshot with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::build(Vec::new(), Vec::new())
    }

    /// Returns all entries in snapshot order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Returns the entry at `position`.
    #[must_use]
    pub fn entry(&self, position: usize) -> Option<&LogEntry> {
        self.entries.get(position)
    }

    /// Finds an entry by its id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns the files this snapshot was built from.
    #[must_use]
    pub fn files(&self) -> &[LogFileMeta] {
        &self.files
    }

    /// Returns when this snapshot was built.
    #[must_use]
    pub const fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of distinct terms.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Positions of entries indexed under exactly `term`.
    #[must_use]
    pub fn postings(&self, term: &str) -> Option<&BTreeSet<usize>> {
        self.terms.get(term)
    }

    /// Positions of entries matching any token of `query`.
    ///
    /// A token matches every indexed term that contains it, so `data`
    /// also finds `database`. This scans all terms once per query token.
    #[must_use]
    pub fn search(&self, query: &str) -> BTreeSet<usize> {
        let tokens = tokenize(query);
        let mut result = BTreeSet::new();

        for token in &tokens {
            if let Some(exact) = self.terms.get(token) {
                result.extend(exact.iter().copied());
            }
            for (term, positions) in &self.terms {
                if term.contains(token.as_str()) {
                    result.extend(positions.iter().copied());
                }
            }
        }

        result
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogLevel;
    use proptest::prelude::*;

    fn make_entry(line_number: usize, message: &str) -> LogEntry {
        LogEntry {
            id: LogEntry::make_id("/logs/debug.log", line_number),
            level: LogLevel::Info,
            message: message.to_string(),
            timestamp: Utc::now(),
            source_file: "/logs/debug.log".to_string(),
            line_number,
            raw: message.to_string(),
            is_structured: false,
        }
    }

    #[test]
    fn tokenize_handles_special_characters() {
        let tokens = tokenize("error: connection-failed (timeout=30s) user_id");
        assert!(tokens.contains(&"error".to_string()));
        assert!(tokens.contains(&"connection".to_string()));
        assert!(tokens.contains(&"failed".to_string()));
        assert!(tokens.contains(&"timeout".to_string()));
        assert!(tokens.contains(&"30s".to_string()));
        assert!(tokens.contains(&"user_id".to_string()));
    }

    #[test]
    fn tokenize_filters_short_tokens() {
        let tokens = tokenize("a an I is x to");
        assert!(!tokens.contains(&"a".to_string()));
        assert!(!tokens.contains(&"i".to_string()));
        assert!(tokens.contains(&"an".to_string()));
        assert!(tokens.contains(&"is".to_string()));
    }

    #[test]
    fn tokenize_lowercases() {
        assert_eq!(tokenize("ERROR Database"), vec!["error", "database"]);
    }

    #[test]
    fn build_indexes_all_entry_fields() {
        let snapshot = Snapshot::build(vec![make_entry(1, "Cache warmed")], Vec::new());

        assert!(snapshot.postings("cache").is_some());
        assert!(snapshot.postings("info").is_some());
        assert!(snapshot.postings("logs").is_some());
        assert!(snapshot.postings("debug").is_some());
        assert!(snapshot.postings("Cache").is_none());
    }

    #[test]
    fn build_preserves_order() {
        let entries = vec![make_entry(1, "zeta"), make_entry(2, "alpha")];
        let snapshot = Snapshot::build(entries, Vec::new());

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.entry(0).map(|e| e.message.as_str()), Some("zeta"));
        assert_eq!(snapshot.entry(1).map(|e| e.message.as_str()), Some("alpha"));
        assert_eq!(snapshot.find("debug.log:2").map(|e| e.line_number), Some(2));
    }

    #[test]
    fn build_is_deterministic() {
        let entries = vec![make_entry(1, "one two"), make_entry(2, "two three")];
        let a = Snapshot::build(entries.clone(), Vec::new());
        let b = Snapshot::build(entries, Vec::new());

        assert_eq!(a.term_count(), b.term_count());
        assert_eq!(a.postings("two"), b.postings("two"));
        assert_eq!(
            a.postings("two").map(|p| p.iter().copied().collect::<Vec<_>>()),
            Some(vec![0, 1])
        );
    }

    #[test]
    fn search_single_token() {
        let snapshot = Snapshot::build(
            vec![
                make_entry(1, "connection established"),
                make_entry(2, "connection failed"),
                make_entry(3, "shutdown complete"),
            ],
            Vec::new(),
        );

        let results = snapshot.search("connection");
        assert_eq!(results.into_iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn search_tokens_are_or_combined() {
        let snapshot = Snapshot::build(
            vec![
                make_entry(1, "database unreachable"),
                make_entry(2, "disk full"),
                make_entry(3, "timeout reached"),
            ],
            Vec::new(),
        );

        let results = snapshot.search("database disk");
        assert_eq!(results.into_iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn search_matches_substrings_of_terms() {
        let snapshot = Snapshot::build(
            vec![make_entry(1, "database unreachable"), make_entry(2, "disk full")],
            Vec::new(),
        );

        let results = snapshot.search("DATA");
        assert_eq!(results.into_iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn search_without_usable_tokens_is_empty() {
        let snapshot = Snapshot::build(vec![make_entry(1, "a b c")], Vec::new());
        assert!(snapshot.search("").is_empty());
        assert!(snapshot.search("a").is_empty());
    }

    #[test]
    fn search_no_match_returns_empty() {
        let snapshot = Snapshot::build(vec![make_entry(1, "test message")], Vec::new());
        assert!(snapshot.search("nonexistent").is_empty());
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = Snapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.term_count(), 0);
        assert!(snapshot.files().is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn tokens_are_lowercase_words(text in "[ -~]{0,64}") {
            for token in tokenize(&text) {
                prop_assert!(token.len() >= MIN_TOKEN_LEN);
                prop_assert!(token.chars().all(|c| c == '_' || c.is_ascii_lowercase() || c.is_ascii_digit()));
            }
        }

        #[test]
        fn tokenizing_tokens_is_stable(text in "[ -~]{0,64}") {
            let tokens = tokenize(&text);
            prop_assert_eq!(tokenize(&tokens.join(" ")), tokens);
        }
    }
}
