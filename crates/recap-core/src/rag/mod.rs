//! Retrieval over generated summaries
//!
//! Keyword search across the summaries directory: score each document,
//! pull the best paragraph as an excerpt, and attach metadata parsed
//! from the filename or frontmatter. No index; the corpus is small
//! enough to scan per query.

pub mod chat;
pub mod score;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{RecapError, Result};

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Excerpt length cap in characters
const MAX_SNIPPET_CHARS: usize = 300;

/// Paragraphs shorter than this are never excerpted
const MIN_PARAGRAPH_CHARS: usize = 10;

fn filename_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").expect("valid regex"))
}

fn filename_hashtag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#(\w+)").expect("valid regex"))
}

/// A summary file loaded for searching
#[derive(Debug, Clone)]
pub struct SummaryDocument {
    pub path: PathBuf,
    pub text: String,
}

/// Metadata derived from a document's filename and frontmatter
#[derive(Debug, Clone, Default)]
pub struct DocumentMeta {
    pub date: Option<NaiveDate>,
    pub hashtag: Option<String>,
}

/// One search hit
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub path: PathBuf,
    pub excerpt: String,
    pub date: Option<NaiveDate>,
    pub hashtag: String,
    pub score: f64,
}

/// Load all markdown files from the summaries directory.
///
/// Files that cannot be read are logged and skipped; a missing
/// directory is an error.
pub fn load_documents(summaries_dir: &Path) -> Result<Vec<SummaryDocument>> {
    if !summaries_dir.is_dir() {
        return Err(RecapError::SummariesDirNotFound {
            path: summaries_dir.to_path_buf(),
        });
    }

    let mut documents = Vec::new();
    for dir_entry in fs::read_dir(summaries_dir)? {
        let path = dir_entry?.path();
        if path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        match fs::read_to_string(&path) {
            Ok(text) => documents.push(SummaryDocument { path, text }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read summary");
            }
        }
    }

    tracing::debug!(count = documents.len(), "loaded summary documents");
    Ok(documents)
}

/// Search documents for the query, best score first, at most `limit`
/// results. Documents with no qualifying matches are excluded.
pub fn search(documents: &[SummaryDocument], query: &str, limit: usize) -> Vec<SearchResult> {
    let query_lower = query.to_lowercase();
    let mut results = Vec::new();

    for doc in documents {
        let relevance = score::relevance(&doc.text, &query_lower);
        if relevance <= 0.0 {
            continue;
        }

        let meta = extract_metadata(&doc.path, &doc.text);
        results.push(SearchResult {
            path: doc.path.clone(),
            excerpt: extract_snippet(&doc.text, &query_lower),
            date: meta.date,
            hashtag: meta.hashtag.unwrap_or_else(|| "unknown".to_string()),
            score: relevance,
        });
    }

    // Stable sort keeps scan order for equal scores
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results.truncate(limit);
    results
}

/// Pull date and hashtag from the filename, letting frontmatter values
/// override when present
pub fn extract_metadata(path: &Path, text: &str) -> DocumentMeta {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut meta = DocumentMeta::default();

    if let Some(caps) = filename_date_re().captures(&stem) {
        meta.date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok();
    }
    if let Some(caps) = filename_hashtag_re().captures(&stem) {
        meta.hashtag = Some(caps[1].to_string());
    }

    if let Some(header) = frontmatter_block(text) {
        if let Ok(value) = serde_yaml::from_str::<serde_yaml::Value>(header) {
            if let Some(date_str) = value.get("date").and_then(|v| v.as_str()) {
                if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
                    meta.date = Some(date);
                }
            }
            if let Some(hashtag) = value.get("hashtag").and_then(|v| v.as_str()) {
                meta.hashtag = Some(hashtag.to_string());
            }
        }
    }

    meta
}

fn frontmatter_block(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("---")?;
    let end = rest.find("\n---")?;
    Some(&rest[..end])
}

/// Pick the paragraph that scores highest against the query, truncated
/// to the excerpt cap. Ties keep the earliest paragraph.
pub fn extract_snippet(text: &str, query_lower: &str) -> String {
    let mut best_paragraph = "";
    let mut best_score = 0.0;

    for paragraph in text.split("\n\n") {
        if paragraph.trim().chars().count() < MIN_PARAGRAPH_CHARS {
            continue;
        }
        let paragraph_score = score::relevance(paragraph, query_lower);
        if paragraph_score > best_score {
            best_score = paragraph_score;
            best_paragraph = paragraph;
        }
    }

    let mut snippet: String = best_paragraph.chars().take(MAX_SNIPPET_CHARS).collect();
    if best_paragraph.chars().count() > MAX_SNIPPET_CHARS {
        snippet.push_str("...");
    }
    snippet.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, text: &str) -> SummaryDocument {
        SummaryDocument {
            path: PathBuf::from(name),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_search_single_document() {
        let docs = vec![doc(
            "Week-2024-01-15-work.md",
            "Short.\n\nWe spent the week on project planning and sprint setup.",
        )];
        let results = search(&docs, "project planning", DEFAULT_SEARCH_LIMIT);

        assert_eq!(results.len(), 1);
        assert!(results[0].score > 0.0);
        assert!(results[0].excerpt.to_lowercase().contains("project planning"));
        assert_eq!(
            results[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_search_excludes_zero_scores() {
        let docs = vec![
            doc("a.md", "nothing relevant here"),
            doc("b.md", "deployment went fine, deployment rollback unneeded"),
        ];
        let results = search(&docs, "deployment", DEFAULT_SEARCH_LIMIT);

        assert_eq!(results.len(), 1);
        assert!(results[0].path.ends_with("b.md"));
    }

    #[test]
    fn test_search_sorted_and_capped() {
        let docs: Vec<SummaryDocument> = (0..8)
            .map(|i| doc(&format!("{i}.md"), &"release ".repeat(i + 1)))
            .collect();
        let results = search(&docs, "release", 3);

        assert_eq!(results.len(), 3);
        assert!(results[0].score >= results[1].score);
        assert!(results[1].score >= results[2].score);
        assert!(results[0].path.ends_with("7.md"));
    }

    #[test]
    fn test_empty_query_finds_nothing() {
        let docs = vec![doc("a.md", "some content")];
        assert!(search(&docs, "", DEFAULT_SEARCH_LIMIT).is_empty());
    }

    #[test]
    fn test_metadata_from_filename() {
        let meta = extract_metadata(Path::new("Week-2024-03-04-standup.md"), "no header");
        assert_eq!(meta.date, NaiveDate::from_ymd_opt(2024, 3, 4));
        // No '#' in the stem, so no hashtag from the filename
        assert!(meta.hashtag.is_none());
    }

    #[test]
    fn test_frontmatter_overrides_filename() {
        let text = "---\ndate: 2024-02-01\nhashtag: meeting\n---\n\nBody text here.";
        let meta = extract_metadata(Path::new("Week-2024-01-15-meeting.md"), text);
        assert_eq!(meta.date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(meta.hashtag.as_deref(), Some("meeting"));
    }

    #[test]
    fn test_snippet_prefers_best_paragraph() {
        let text = "Intro paragraph about nothing much.\n\n\
                    The deployment failed twice, deployment logs attached.\n\n\
                    Closing remarks.";
        let snippet = extract_snippet(text, "deployment");
        assert!(snippet.starts_with("The deployment failed"));
    }

    #[test]
    fn test_snippet_truncated_with_ellipsis() {
        let long = format!("deployment {}", "x".repeat(400));
        let snippet = extract_snippet(&long, "deployment");
        assert!(snippet.ends_with("..."));
        assert!(snippet.chars().count() <= MAX_SNIPPET_CHARS + 3);
    }

    #[test]
    fn test_snippet_skips_short_paragraphs() {
        let text = "deploy\n\nA longer paragraph mentioning deploy once more.";
        let snippet = extract_snippet(text, "deploy");
        assert!(snippet.starts_with("A longer paragraph"));
    }

    #[test]
    fn test_load_documents_missing_dir() {
        let err = load_documents(Path::new("/nonexistent/summaries")).unwrap_err();
        assert!(matches!(err, RecapError::SummariesDirNotFound { .. }));
    }

    #[test]
    fn test_load_documents_reads_markdown_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.md"), "alpha").unwrap();
        std::fs::write(dir.path().join("two.md"), "beta").unwrap();
        std::fs::write(dir.path().join("skip.txt"), "gamma").unwrap();

        let docs = load_documents(dir.path()).unwrap();
        assert_eq!(docs.len(), 2);
    }
}
