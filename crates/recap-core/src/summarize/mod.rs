//! Batch summarization via a generation service
//!
//! Assembles prompts from batches and hands them to a [`TextGenerator`].
//! Transport failures surface in the response rather than aborting a
//! multi-batch run.

pub mod client;

use std::time::Instant;

pub use client::{OllamaClient, TextGenerator};

use crate::batch::Batch;
use crate::entry::Entry;

/// Per-entry content cap in the prompt, to keep batches inside the
/// model's context window
const MAX_ENTRY_CHARS: usize = 1000;

/// System prompt prefixed to every summarization request
const SYSTEM_PROMPT: &str = "\
You are a helpful assistant that creates concise, well-structured summaries of journal entries.

Your task is to summarize journal entries tagged with a specific hashtag, focusing on:
- Key activities and events
- Important decisions or insights
- Patterns or recurring themes
- Action items or follow-ups

Guidelines:
- Be concise but comprehensive
- Use bullet points for clarity
- Group related items together
- Maintain chronological order when relevant
- Focus on actionable insights

Format your response as clean markdown with appropriate headings and bullet points.";

/// Outcome of summarizing one batch
#[derive(Debug, Clone)]
pub struct SummaryResponse {
    /// Generated summary content (empty on error)
    pub content: String,
    /// Model that produced the content
    pub model: String,
    /// Wall-clock seconds the request took
    pub request_time: f64,
    /// Error description when generation failed
    pub error: Option<String>,
}

/// Summarizes batches through a generation backend
pub struct Summarizer<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> Summarizer<G> {
    pub fn new(generator: G) -> Self {
        Summarizer { generator }
    }

    /// Access the underlying generator
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Summarize a batch of entries for the given hashtag
    pub fn summarize_batch(&self, batch: &Batch, hashtag: &str) -> SummaryResponse {
        if batch.entries.is_empty() {
            return SummaryResponse {
                content: "No entries to summarize.".to_string(),
                model: self.generator.model().to_string(),
                request_time: 0.0,
                error: None,
            };
        }

        let prompt = self.build_prompt(batch, hashtag);

        let start = Instant::now();
        match self.generator.generate(&prompt) {
            Ok(content) => SummaryResponse {
                content,
                model: self.generator.model().to_string(),
                request_time: start.elapsed().as_secs_f64(),
                error: None,
            },
            Err(e) => {
                tracing::error!(batch_id = batch.batch_id, error = %e, "summarization failed");
                SummaryResponse {
                    content: String::new(),
                    model: self.generator.model().to_string(),
                    request_time: start.elapsed().as_secs_f64(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    fn build_prompt(&self, batch: &Batch, hashtag: &str) -> String {
        let date_range = match batch.date_range {
            (Some(start), Some(end)) => {
                format!("{} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
            }
            _ => "All dates".to_string(),
        };

        let batch_info = if batch.total_batches > 1 {
            format!("Batch {} of {}", batch.batch_id, batch.total_batches)
        } else {
            "Single batch".to_string()
        };

        format!(
            "{system}\n\nPlease summarize the following journal entries tagged with #{hashtag}:\n\n\
             **Date Range**: {date_range}\n\
             **Batch**: {batch_info}\n\
             **Total Entries**: {count}\n\n\
             {entries}\n\n\
             Please provide a structured summary that captures the key points, themes, and insights from these entries.",
            system = SYSTEM_PROMPT,
            hashtag = hashtag,
            date_range = date_range,
            batch_info = batch_info,
            count = batch.entries.len(),
            entries = format_entries(&batch.entries),
        )
    }
}

/// Render entries for the prompt, capping each body at
/// [`MAX_ENTRY_CHARS`] characters
fn format_entries(entries: &[Entry]) -> String {
    let formatted: Vec<String> = entries
        .iter()
        .map(|entry| {
            let date_str = entry
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "Unknown date".to_string());

            let mut content: String = entry.content.chars().take(MAX_ENTRY_CHARS).collect();
            if entry.content.chars().count() > MAX_ENTRY_CHARS {
                content.push_str("... [truncated]");
            }

            format!("**{} - {}**\n{}", date_str, entry.title, content)
        })
        .collect();

    formatted.join("\n\n---\n\n")
}
