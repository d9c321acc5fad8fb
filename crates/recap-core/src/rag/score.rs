//! Keyword relevance scoring
//!
//! Word-frequency matching over lower-cased text. Words shorter than
//! three characters never contribute occurrences, but the normalization
//! divisor counts every query word, so stop-word-heavy queries score
//! lower across the board. Kept as-is for output compatibility.

/// Minimum query word length that contributes to the score
const MIN_WORD_LEN: usize = 3;

/// Divisor factor per query word when normalizing raw counts
const EXPECTED_FREQUENCY: f64 = 10.0;

/// Score `text` against an already lower-cased `query`.
///
/// Returns a value in `[0.0, 1.0]`; 0.0 for an empty query or a text
/// with no matches.
pub fn relevance(text: &str, query: &str) -> f64 {
    let text_lower = text.to_lowercase();
    let query_words: Vec<&str> = query.split_whitespace().collect();
    if query_words.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;
    for word in &query_words {
        if word.chars().count() < MIN_WORD_LEN {
            continue;
        }
        score += text_lower.matches(word).count() as f64;
    }

    score /= query_words.len() as f64 * EXPECTED_FREQUENCY;
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_scores_zero() {
        assert_eq!(relevance("anything at all", ""), 0.0);
        assert_eq!(relevance("anything at all", "   "), 0.0);
    }

    #[test]
    fn test_no_match_scores_zero() {
        assert_eq!(relevance("meeting notes from monday", "deployment"), 0.0);
    }

    #[test]
    fn test_occurrence_counting() {
        // "project" appears twice, one query word, divisor 10
        let score = relevance("project kickoff and project review", "project");
        assert!((score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_case_insensitive_text() {
        assert!(relevance("Project PLANNING session", "project planning") > 0.0);
    }

    #[test]
    fn test_short_words_dilute_but_never_count() {
        // "on" is too short to match, yet still inflates the divisor
        let with_stopword = relevance("project project", "project on");
        let without = relevance("project project", "project");
        assert!(with_stopword < without);
        assert!(with_stopword > 0.0);
    }

    #[test]
    fn test_monotonic_in_occurrences() {
        let once = relevance("deploy", "deploy now");
        let twice = relevance("deploy deploy", "deploy now");
        assert!(twice > once);
    }

    #[test]
    fn test_clamped_to_one() {
        let text = "release ".repeat(100);
        assert_eq!(relevance(&text, "release"), 1.0);
    }
}
