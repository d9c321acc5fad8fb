//! Command dispatch logic for recap

use std::time::Instant;

use crate::cli::{Cli, Commands};
use recap_core::error::Result;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let result = match &cli.command {
        Commands::Summarize {
            vault_path,
            hashtag,
            start_date,
            end_date,
            model,
            window_days,
            dry_run,
        } => super::summarize::run(
            cli,
            super::summarize::SummarizeArgs {
                vault_path,
                hashtag,
                start_date: start_date.as_deref(),
                end_date: end_date.as_deref(),
                model: model.as_deref(),
                window_days: *window_days,
                dry_run: *dry_run,
            },
        ),
        Commands::Scan {
            vault_path,
            hashtag,
        } => super::scan::run(cli, vault_path, hashtag.as_deref()),
        Commands::Chat {
            summaries,
            model,
            query,
        } => super::chat::run(cli, summaries, model.as_deref(), query.as_deref()),
        Commands::Suggest {
            vault_path,
            hashtag,
            target_tokens,
        } => super::suggest::run(cli, vault_path, hashtag, *target_tokens),
    };

    tracing::debug!(elapsed = ?start.elapsed(), "command finished");
    result
}
