//! `recap scan` - list the entries a summarize run would see

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use recap_core::config::Config;
use recap_core::entry::{self, EntryFilter};
use recap_core::error::Result;
use recap_core::vault::VaultScanner;

pub fn run(cli: &Cli, vault_path: &Path, hashtag: Option<&str>) -> Result<()> {
    let config = Config::resolve(vault_path)?;
    let scanner = VaultScanner::new(vault_path, &config.exclude_dirs)?;

    if !scanner.looks_like_obsidian_vault() {
        tracing::warn!(vault = %vault_path.display(), "no .obsidian directory found");
    }

    let scan = scanner.scan();

    match hashtag {
        Some(tag) => {
            let filter = EntryFilter::new(tag, None, None);
            let entries = entry::parse_files(&scan.markdown_files, &filter);

            if cli.format == OutputFormat::Json {
                let listed: Vec<serde_json::Value> = entries
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "path": e.path,
                            "title": e.title,
                            "date": e.date.map(|d| d.format("%Y-%m-%d").to_string()),
                        })
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::json!({
                        "vault": scan.vault_path,
                        "markdown_files": scan.markdown_files.len(),
                        "hashtag": filter.hashtag(),
                        "entries": listed,
                    })
                );
            } else {
                println!(
                    "{} markdown files, {} tagged #{}",
                    scan.markdown_files.len(),
                    entries.len(),
                    filter.hashtag()
                );
                for e in &entries {
                    let date = e
                        .date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "undated".to_string());
                    println!("  {} ({})", e.title, date);
                }
            }
        }
        None => {
            if cli.format == OutputFormat::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "vault": scan.vault_path,
                        "markdown_files": scan.markdown_files.len(),
                        "total_files": scan.total_files,
                        "scan_time_ms": scan.scan_time_ms,
                    })
                );
            } else {
                println!(
                    "{} markdown files ({} files total, {:.1}ms)",
                    scan.markdown_files.len(),
                    scan.total_files,
                    scan.scan_time_ms
                );
            }
        }
    }

    Ok(())
}
