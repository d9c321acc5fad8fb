//! CLI argument parsing for recap
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// Machine-readable JSON
    Json,
}

/// Recap - weekly hashtag summaries for Obsidian vaults
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RECAP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a summary of entries tagged with a hashtag
    Summarize {
        /// Path to the Obsidian vault
        vault_path: PathBuf,

        /// Hashtag to filter entries (e.g. meeting, #work)
        #[arg(long, short = 't')]
        hashtag: String,

        /// Start date (YYYY-MM-DD), defaults to last Monday
        #[arg(long)]
        start_date: Option<String>,

        /// End date (YYYY-MM-DD), defaults to the Sunday after start
        #[arg(long)]
        end_date: Option<String>,

        /// Model to use, overriding configuration
        #[arg(long, short = 'm')]
        model: Option<String>,

        /// Batch by date window instead of by count, using this many
        /// days per batch
        #[arg(long)]
        window_days: Option<i64>,

        /// Show batches without calling the generation service
        #[arg(long)]
        dry_run: bool,
    },

    /// Scan the vault and report matching entries
    Scan {
        /// Path to the Obsidian vault
        vault_path: PathBuf,

        /// Optional hashtag to filter entries
        #[arg(long, short = 't')]
        hashtag: Option<String>,
    },

    /// Chat with generated summaries
    Chat {
        /// Directory containing summaries
        #[arg(long, short = 's')]
        summaries: PathBuf,

        /// Model to use for chat
        #[arg(long, short = 'm')]
        model: Option<String>,

        /// Ask a single question instead of starting a session
        #[arg(long)]
        query: Option<String>,
    },

    /// Suggest a batch size for the vault's entries
    Suggest {
        /// Path to the Obsidian vault
        vault_path: PathBuf,

        /// Hashtag to filter entries
        #[arg(long, short = 't')]
        hashtag: String,

        /// Target tokens per batch, overriding configuration
        #[arg(long)]
        target_tokens: Option<usize>,
    },
}
