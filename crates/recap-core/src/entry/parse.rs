//! Extraction of frontmatter, titles, dates, and hashtags from raw markdown.

use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::frontmatter::EntryFrontmatter;

static HASHTAG_PATTERN: OnceLock<Regex> = OnceLock::new();
static HEADING_PATTERN: OnceLock<Regex> = OnceLock::new();
static DATE_PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

fn hashtag_pattern() -> &'static Regex {
    HASHTAG_PATTERN.get_or_init(|| Regex::new(r"#(\w+)").expect("valid hashtag regex"))
}

fn heading_pattern() -> &'static Regex {
    HEADING_PATTERN.get_or_init(|| Regex::new(r"(?m)^#\s+(.+)$").expect("valid heading regex"))
}

/// Date patterns common in journal naming, paired with their chrono formats
fn date_patterns() -> &'static [(Regex, &'static str)] {
    DATE_PATTERNS.get_or_init(|| {
        vec![
            (
                Regex::new(r"(\d{4}-\d{2}-\d{2})").expect("valid date regex"),
                "%Y-%m-%d",
            ),
            (
                Regex::new(r"(\d{1,2}/\d{1,2}/\d{4})").expect("valid date regex"),
                "%m/%d/%Y",
            ),
            (
                Regex::new(r"(\d{1,2}-\d{1,2}-\d{4})").expect("valid date regex"),
                "%d-%m-%Y",
            ),
        ]
    })
}

/// Split YAML frontmatter off markdown content.
///
/// Lenient: content without a frontmatter block, or with frontmatter that
/// fails to parse, yields default frontmatter and the content untouched.
pub(crate) fn split_frontmatter(content: &str) -> (EntryFrontmatter, &str) {
    if !content.starts_with("---") {
        return (EntryFrontmatter::default(), content);
    }

    let after_first = &content[3..];
    let Some(end_pos) = after_first.find("\n---") else {
        return (EntryFrontmatter::default(), content);
    };

    let yaml_content = &after_first[..end_pos];
    let body_start = 3 + end_pos + 4;
    let body = if body_start < content.len() {
        content[body_start..].trim_start_matches('\n')
    } else {
        ""
    };

    match serde_yaml::from_str::<EntryFrontmatter>(yaml_content) {
        Ok(frontmatter) => (frontmatter, body),
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse frontmatter, treating as body");
            (EntryFrontmatter::default(), content)
        }
    }
}

/// Extract the title from frontmatter, first heading, or file stem
pub(crate) fn extract_title(path: &Path, frontmatter: &EntryFrontmatter, body: &str) -> String {
    if let Some(title) = &frontmatter.title {
        return title.clone();
    }

    if let Some(caps) = heading_pattern().captures(body) {
        return caps[1].trim().to_string();
    }

    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Extract all hashtags (without the `#`) from the body
pub(crate) fn extract_hashtags(body: &str) -> std::collections::HashSet<String> {
    hashtag_pattern()
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Extract the entry date from frontmatter, then filename, then body
pub(crate) fn extract_date(
    path: &Path,
    frontmatter: &EntryFrontmatter,
    body: &str,
) -> Option<NaiveDate> {
    if let Some(raw) = &frontmatter.date {
        if let Some(date) = parse_date_str(raw) {
            return Some(date);
        }
    }

    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned());
    if let Some(stem) = stem {
        if let Some(date) = find_date(&stem) {
            return Some(date);
        }
    }

    find_date(body)
}

/// Find the first recognizable date in a piece of text
fn find_date(text: &str) -> Option<NaiveDate> {
    for (pattern, format) in date_patterns() {
        if let Some(caps) = pattern.captures(text) {
            if let Ok(date) = NaiveDate::parse_from_str(&caps[1], format) {
                return Some(date);
            }
        }
    }
    None
}

/// Parse a frontmatter date scalar, accepting the same formats as filenames
pub(crate) fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    // Timestamps like `2024-01-15T09:00:00` still carry a usable date prefix
    find_date(raw)
}
