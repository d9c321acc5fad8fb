//! Journal entry parsing and filtering
//!
//! Entries are markdown files, optionally carrying YAML frontmatter.
//! Parsing is lenient: notes without frontmatter are normal in a vault,
//! so missing metadata degrades to fallbacks instead of failing.

pub mod frontmatter;
pub mod parse;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::Result;

pub use frontmatter::EntryFrontmatter;

/// A parsed journal entry
#[derive(Debug, Clone)]
pub struct Entry {
    /// Path to the source file
    pub path: PathBuf,
    /// Entry title (frontmatter, first heading, or file stem)
    pub title: String,
    /// Body content with frontmatter removed
    pub content: String,
    /// Entry date, if one could be determined
    pub date: Option<NaiveDate>,
    /// Hashtags found in the body (without `#`)
    pub hashtags: HashSet<String>,
}

impl Entry {
    /// Parse an entry from raw markdown content
    pub fn parse(content: &str, path: &Path) -> Self {
        let (frontmatter, body) = parse::split_frontmatter(content);
        let title = parse::extract_title(path, &frontmatter, body);
        let hashtags = parse::extract_hashtags(body);
        let date = parse::extract_date(path, &frontmatter, body);

        Entry {
            path: path.to_path_buf(),
            title,
            content: body.trim().to_string(),
            date,
            hashtags,
        }
    }

    /// Read and parse an entry from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content, path))
    }
}

/// Filter criteria for selecting entries
#[derive(Debug, Clone)]
pub struct EntryFilter {
    target_hashtag: String,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl EntryFilter {
    /// Create a filter for a hashtag (leading `#` is stripped) and an
    /// optional inclusive date range
    pub fn new(
        target_hashtag: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        EntryFilter {
            target_hashtag: target_hashtag.trim_start_matches('#').to_string(),
            start_date,
            end_date,
        }
    }

    /// The normalized hashtag this filter selects
    pub fn hashtag(&self) -> &str {
        &self.target_hashtag
    }

    /// Check whether an entry matches the hashtag and date range.
    ///
    /// Undated entries pass the date check; the caller decides how to
    /// group them downstream.
    pub fn matches(&self, entry: &Entry) -> bool {
        if !entry.hashtags.contains(&self.target_hashtag) {
            return false;
        }

        if let (Some(start), Some(end), Some(date)) = (self.start_date, self.end_date, entry.date)
        {
            if date < start || date > end {
                return false;
            }
        }

        true
    }
}

/// Parse a set of files and keep the entries matching the filter.
///
/// Files that fail to read are logged and skipped; a vault routinely
/// contains the odd unreadable file and that is not fatal.
pub fn parse_files(paths: &[PathBuf], filter: &EntryFilter) -> Vec<Entry> {
    let mut entries = Vec::new();

    for path in paths {
        match Entry::from_file(path) {
            Ok(entry) => {
                if filter.matches(&entry) {
                    tracing::debug!(path = %path.display(), "matched entry");
                    entries.push(entry);
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to parse entry");
            }
        }
    }

    tracing::info!(
        matched = entries.len(),
        scanned = paths.len(),
        hashtag = filter.hashtag(),
        "parsed entries"
    );
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(content: &str, name: &str) -> Entry {
        Entry::parse(content, Path::new(name))
    }

    #[test]
    fn test_parse_entry_with_frontmatter() {
        let e = entry(
            "---\ntitle: Planning\ndate: 2024-01-15\n---\n\nSprint planning #meeting notes.\n",
            "planning.md",
        );
        assert_eq!(e.title, "Planning");
        assert_eq!(e.date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert!(e.hashtags.contains("meeting"));
        assert_eq!(e.content, "Sprint planning #meeting notes.");
    }

    #[test]
    fn test_parse_plain_entry() {
        let e = entry("Quick thought #idea", "2024-02-01-scratch.md");
        assert_eq!(e.title, "2024-02-01-scratch");
        assert_eq!(e.date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert!(e.hashtags.contains("idea"));
    }

    #[test]
    fn test_filter_by_hashtag() {
        let filter = EntryFilter::new("#meeting", None, None);
        assert_eq!(filter.hashtag(), "meeting");

        let matching = entry("Team sync #meeting", "a.md");
        let other = entry("Gym #health", "b.md");
        assert!(filter.matches(&matching));
        assert!(!filter.matches(&other));
    }

    #[test]
    fn test_filter_by_date_range() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
        let filter = EntryFilter::new("meeting", Some(start), Some(end));

        let inside = entry("#meeting", "2024-01-17.md");
        let outside = entry("#meeting", "2024-02-01.md");
        let undated = entry("#meeting undated", "ideas.md");

        assert!(filter.matches(&inside));
        assert!(!filter.matches(&outside));
        // Undated entries pass the date check
        assert!(filter.matches(&undated));
    }
}
