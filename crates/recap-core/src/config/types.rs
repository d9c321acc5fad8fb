//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Vault-local configuration (`.recap.toml` at the vault root)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of entries per batch
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Maximum estimated tokens per batch (cost control)
    #[serde(default = "default_max_tokens_per_batch")]
    pub max_tokens_per_batch: usize,

    /// Target tokens per batch used by the batch-size hint
    #[serde(default = "default_target_tokens")]
    pub target_tokens: usize,

    /// Model passed to the generation endpoint
    #[serde(default = "default_model")]
    pub model: String,

    /// Ollama host and port
    #[serde(default = "default_ollama_host")]
    pub ollama_host: String,

    /// Request timeout in seconds for generation calls
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Directory (relative to the vault) where summaries are written
    #[serde(default = "default_summaries_dir")]
    pub summaries_dir: String,

    /// Additional vault directories to exclude from scanning
    #[serde(default)]
    pub exclude_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_batch_size: default_max_batch_size(),
            max_tokens_per_batch: default_max_tokens_per_batch(),
            target_tokens: default_target_tokens(),
            model: default_model(),
            ollama_host: default_ollama_host(),
            request_timeout_seconds: default_request_timeout(),
            summaries_dir: default_summaries_dir(),
            exclude_dirs: Vec::new(),
        }
    }
}

fn default_max_batch_size() -> usize {
    20
}

fn default_max_tokens_per_batch() -> usize {
    4000
}

fn default_target_tokens() -> usize {
    3000
}

fn default_model() -> String {
    "llama2:7b".to_string()
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_summaries_dir() -> String {
    "Summaries".to_string()
}
