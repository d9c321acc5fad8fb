//! Token estimation heuristics
//!
//! Rough estimate: 1 token is about 4 characters of English text. Each
//! entry also pays a fixed overhead for formatting and metadata once it
//! is rendered into a prompt. Deliberately approximate; nothing here
//! promises to match a real tokenizer.

use crate::entry::Entry;

/// Characters per estimated token
const CHARS_PER_TOKEN: usize = 4;

/// Fixed per-entry cost for formatting and metadata
const ENTRY_OVERHEAD_TOKENS: usize = 50;

/// Estimate the token count of a piece of text
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

/// Estimate the token cost of an entry (title + content + overhead)
pub fn estimate_entry_tokens(entry: &Entry) -> usize {
    let text = format!("{}\n{}", entry.title, entry.content);
    estimate_tokens(&text) + ENTRY_OVERHEAD_TOKENS
}
