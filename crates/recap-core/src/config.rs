//! Configuration for recap
//!
//! A vault may carry a local `.recap.toml` at its root; user-level defaults
//! live in `~/.config/recap/config.toml`.

pub mod global;
pub mod types;

use std::fs;
use std::path::Path;

use crate::error::Result;

pub use global::GlobalConfig;
pub use types::Config;

/// Filename of the vault-local configuration
pub const VAULT_CONFIG_FILE: &str = ".recap.toml";

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the effective config for a vault.
    ///
    /// Layering: vault-local `.recap.toml` when present, otherwise built-in
    /// defaults, with global user config filling the model/host fields.
    pub fn resolve(vault_path: &Path) -> Result<Self> {
        let local_path = vault_path.join(VAULT_CONFIG_FILE);
        let mut config = if local_path.exists() {
            Self::load(&local_path)?
        } else {
            Self::default()
        };

        let global = GlobalConfig::load().unwrap_or_default();
        if !local_path.exists() {
            if let Some(model) = global.model {
                config.model = model;
            }
            if let Some(host) = global.ollama_host {
                config.ollama_host = host;
            }
        }

        Ok(config)
    }
}
