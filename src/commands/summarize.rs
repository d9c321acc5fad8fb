//! `recap summarize` - generate a weekly summary for a hashtag

use std::path::Path;

use chrono::{Datelike, Days, Local, NaiveDate};

use crate::cli::{Cli, OutputFormat};
use recap_core::batch::{Batch, Batcher};
use recap_core::config::Config;
use recap_core::entry::{self, EntryFilter};
use recap_core::error::{RecapError, Result};
use recap_core::summarize::{OllamaClient, Summarizer};
use recap_core::vault::VaultScanner;
use recap_core::writer::SummaryWriter;

pub struct SummarizeArgs<'a> {
    pub vault_path: &'a Path,
    pub hashtag: &'a str,
    pub start_date: Option<&'a str>,
    pub end_date: Option<&'a str>,
    pub model: Option<&'a str>,
    pub window_days: Option<i64>,
    pub dry_run: bool,
}

pub fn run(cli: &Cli, args: SummarizeArgs) -> Result<()> {
    let config = Config::resolve(args.vault_path)?;
    let (start, end) = resolve_date_range(args.start_date, args.end_date)?;

    let scanner = VaultScanner::new(args.vault_path, &config.exclude_dirs)?;
    let scan = scanner.scan();

    let filter = EntryFilter::new(args.hashtag, Some(start), Some(end));
    let entries = entry::parse_files(&scan.markdown_files, &filter);

    if entries.is_empty() {
        if cli.format == OutputFormat::Json {
            println!(
                "{}",
                serde_json::json!({
                    "hashtag": filter.hashtag(),
                    "entries": 0,
                    "batches": 0,
                    "summary_file": serde_json::Value::Null,
                })
            );
        } else if !cli.quiet {
            println!(
                "No entries tagged #{} between {} and {}",
                filter.hashtag(),
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            );
        }
        return Ok(());
    }

    let batcher = Batcher::new(config.max_batch_size, config.max_tokens_per_batch);
    let batches = match args.window_days {
        Some(days) if days < 1 => {
            return Err(RecapError::invalid_value("window days", days));
        }
        Some(days) => batcher.create_batches_by_date(&entries, days),
        None => batcher.create_batches(&entries),
    };

    if args.dry_run {
        return report_dry_run(cli, &batcher, &batches, filter.hashtag());
    }

    let model = args.model.unwrap_or(&config.model);
    let client = OllamaClient::new(&config.ollama_host, model, config.request_timeout_seconds);
    if !client.test_connection() {
        return Err(RecapError::Generation {
            reason: format!(
                "cannot reach Ollama at {} or model {} is unavailable",
                config.ollama_host, model
            ),
        });
    }

    let (batch_summaries, failures) =
        generate_summaries(cli, &batcher, &batches, filter.hashtag(), client)?;

    let writer = SummaryWriter::new(&args.vault_path.join(&config.summaries_dir))?;
    let summary_file = writer.write_summary(
        &batch_summaries,
        filter.hashtag(),
        start,
        end,
        model,
        entries.len(),
        batches.len(),
    )?;

    if cli.format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::json!({
                "hashtag": filter.hashtag(),
                "entries": entries.len(),
                "batches": batches.len(),
                "failed_batches": failures,
                "summary_file": summary_file,
            })
        );
    } else if !cli.quiet {
        println!("Summary written to {}", summary_file.display());
    }

    Ok(())
}

/// Summarize each batch, collecting the contents that succeeded
fn generate_summaries(
    cli: &Cli,
    batcher: &Batcher,
    batches: &[Batch],
    hashtag: &str,
    client: OllamaClient,
) -> Result<(Vec<String>, usize)> {
    let summarizer = Summarizer::new(client);
    let mut batch_summaries = Vec::with_capacity(batches.len());
    let mut failures = 0usize;

    for batch in batches {
        if !cli.quiet && cli.format == OutputFormat::Human {
            println!("{}", batcher.batch_summary(batch));
        }
        let response = summarizer.summarize_batch(batch, hashtag);
        if response.error.is_some() {
            failures += 1;
        } else {
            batch_summaries.push(response.content);
        }
    }

    if batch_summaries.is_empty() {
        return Err(RecapError::Generation {
            reason: format!("all {} batches failed to summarize", failures),
        });
    }
    if failures > 0 {
        tracing::warn!(failures, "some batches failed and were left out");
    }

    Ok((batch_summaries, failures))
}

fn report_dry_run(cli: &Cli, batcher: &Batcher, batches: &[Batch], hashtag: &str) -> Result<()> {
    if cli.format == OutputFormat::Json {
        let described: Vec<serde_json::Value> = batches
            .iter()
            .map(|b| {
                serde_json::json!({
                    "batch_id": b.batch_id,
                    "entries": b.entries.len(),
                    "estimated_tokens": b.estimated_tokens,
                    "date_range": [
                        b.date_range.0.map(|d| d.format("%Y-%m-%d").to_string()),
                        b.date_range.1.map(|d| d.format("%Y-%m-%d").to_string()),
                    ],
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "hashtag": hashtag,
                "dry_run": true,
                "batches": described,
            })
        );
    } else {
        println!("Dry run for #{}: {} batch(es)", hashtag, batches.len());
        for batch in batches {
            println!("  {}", batcher.batch_summary(batch));
        }
    }
    Ok(())
}

/// Resolve the date range, defaulting to last week (Monday to Sunday)
fn resolve_date_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<(NaiveDate, NaiveDate)> {
    let start = match start_date {
        Some(s) => parse_date(s)?,
        None => previous_monday(Local::now().date_naive()),
    };

    let end = match end_date {
        Some(s) => parse_date(s)?,
        // Sunday of the start date's week
        None => start + Days::new(6 - u64::from(start.weekday().num_days_from_monday())),
    };

    if end < start {
        return Err(RecapError::invalid_value(
            "date range",
            format!("{} to {}", start, end),
        ));
    }

    tracing::info!(start = %start, end = %end, "resolved date range");
    Ok((start, end))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RecapError::invalid_value("date", s))
}

/// The most recent Monday strictly before `today`
fn previous_monday(today: NaiveDate) -> NaiveDate {
    let offset = u64::from(today.weekday().num_days_from_monday());
    let back = if offset == 0 { 7 } else { offset };
    today - Days::new(back)
}
