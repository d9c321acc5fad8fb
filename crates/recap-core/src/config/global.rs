//! Global configuration for recap (stored in ~/.config/recap/config.toml)

use std::fs;
use std::path::PathBuf;

use crate::error::{RecapError, Result};

const CONFIG_DIR: &str = "recap";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "RECAP_CONFIG_DIR";

/// User-level defaults applied when a vault has no local config
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct GlobalConfig {
    /// Default model for summarization and chat
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Default Ollama host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ollama_host: Option<String>,
}

impl GlobalConfig {
    fn config_path() -> Result<PathBuf> {
        // Allow environment variable override for testing
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    RecapError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            RecapError::Other(format!(
                "failed to read global config from {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            RecapError::Other(format!(
                "failed to parse global config from {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let config_dir = path
            .parent()
            .ok_or_else(|| RecapError::Other("invalid config path".to_string()))?;

        fs::create_dir_all(config_dir).map_err(|e| {
            RecapError::Other(format!(
                "failed to create config directory {}: {}",
                config_dir.display(),
                e
            ))
        })?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| RecapError::Other(format!("failed to serialize config: {}", e)))?;

        fs::write(&path, content).map_err(|e| {
            RecapError::Other(format!(
                "failed to write config to {}: {}",
                path.display(),
                e
            ))
        })
    }
}
