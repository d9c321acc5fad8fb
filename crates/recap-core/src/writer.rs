//! Summary aggregation and note writing
//!
//! Consolidates batch summaries into one markdown note with YAML
//! frontmatter and writes it into the summaries directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::error::Result;

/// Frontmatter written at the top of each generated summary
#[derive(Debug, Clone, Serialize)]
pub struct SummaryMetadata {
    pub title: String,
    pub date: String,
    pub model: String,
    pub hashtag: String,
    pub entries_processed: usize,
    pub generation_time: String,
    pub batch_count: usize,
}

/// Writes consolidated summaries to files
#[derive(Debug)]
pub struct SummaryWriter {
    output_dir: PathBuf,
}

impl SummaryWriter {
    /// Create a writer, creating the output directory if needed
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir)?;
        tracing::info!(dir = %output_dir.display(), "initialized summary writer");
        Ok(SummaryWriter {
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write a consolidated summary and return the path of the new file
    #[allow(clippy::too_many_arguments)]
    pub fn write_summary(
        &self,
        batch_summaries: &[String],
        hashtag: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        model: &str,
        entries_processed: usize,
        batch_count: usize,
    ) -> Result<PathBuf> {
        let file_path = self.output_dir.join(generate_filename(hashtag, start_date));

        let now = Local::now();
        let metadata = SummaryMetadata {
            title: format!(
                "Week Summary - #{} ({} to {})",
                hashtag,
                start_date.format("%Y-%m-%d"),
                end_date.format("%Y-%m-%d")
            ),
            date: now.format("%Y-%m-%d").to_string(),
            model: model.to_string(),
            hashtag: hashtag.to_string(),
            entries_processed,
            generation_time: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
            batch_count,
        };

        let content = render_summary(batch_summaries, &metadata)?;
        fs::write(&file_path, content)?;
        tracing::info!(path = %file_path.display(), "summary written");
        Ok(file_path)
    }

    /// List summary files in the output directory, sorted by path
    pub fn list_summaries(&self) -> Result<Vec<PathBuf>> {
        let mut summaries: Vec<PathBuf> = fs::read_dir(&self.output_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
            .collect();
        summaries.sort();
        Ok(summaries)
    }
}

/// Filename format: `Week-YYYY-MM-DD-hashtag.md`
fn generate_filename(hashtag: &str, start_date: NaiveDate) -> String {
    format!(
        "Week-{}-{}.md",
        start_date.format("%Y-%m-%d"),
        slug::slugify(hashtag)
    )
}

fn render_summary(batch_summaries: &[String], metadata: &SummaryMetadata) -> Result<String> {
    let frontmatter = serde_yaml::to_string(metadata)?;
    let merged = merge_batch_summaries(batch_summaries);

    Ok(format!(
        "---\n{frontmatter}---\n\n# {title}\n\n{merged}\n\n\
         ## Summary Statistics\n\
         - **Total Entries**: {entries}\n\
         - **Batches Processed**: {batches}\n\
         - **Model Used**: {model}\n\
         - **Generation Time**: {time}\n",
        frontmatter = frontmatter,
        title = metadata.title,
        merged = merged,
        entries = metadata.entries_processed,
        batches = metadata.batch_count,
        model = metadata.model,
        time = metadata.generation_time,
    ))
}

/// A single batch passes through unchanged; multiple batches get
/// `### Batch N` headings
fn merge_batch_summaries(batch_summaries: &[String]) -> String {
    match batch_summaries {
        [] => "No content to summarize.".to_string(),
        [only] => only.clone(),
        many => many
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.trim().is_empty())
            .map(|(i, s)| format!("### Batch {}\n{}\n", i + 1, s.trim()))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
