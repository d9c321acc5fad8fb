//! `recap suggest` - recommend a batch size for a hashtag's entries

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use recap_core::batch::Batcher;
use recap_core::config::Config;
use recap_core::entry::{self, EntryFilter};
use recap_core::error::Result;
use recap_core::vault::VaultScanner;

pub fn run(
    cli: &Cli,
    vault_path: &Path,
    hashtag: &str,
    target_tokens: Option<usize>,
) -> Result<()> {
    let config = Config::resolve(vault_path)?;
    let target = target_tokens.unwrap_or(config.target_tokens);

    let scanner = VaultScanner::new(vault_path, &config.exclude_dirs)?;
    let scan = scanner.scan();

    let filter = EntryFilter::new(hashtag, None, None);
    let entries = entry::parse_files(&scan.markdown_files, &filter);

    let batcher = Batcher::new(config.max_batch_size, config.max_tokens_per_batch);
    let suggested = batcher.suggest_batch_size(&entries, target);

    if cli.format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::json!({
                "hashtag": filter.hashtag(),
                "entries": entries.len(),
                "target_tokens": target,
                "suggested_batch_size": suggested,
            })
        );
    } else {
        println!(
            "{} entries tagged #{}; suggested batch size for ~{} tokens: {}",
            entries.len(),
            filter.hashtag(),
            target,
            suggested
        );
    }

    Ok(())
}
