//! Error types and exit codes for recap
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (missing vault, invalid frontmatter, etc.)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes reported by the recap binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing vault, invalid frontmatter (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during recap operations
#[derive(Error, Debug)]
pub enum RecapError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("vault path does not exist: {path:?}")]
    VaultNotFound { path: PathBuf },

    #[error("vault path is not a directory: {path:?}")]
    NotADirectory { path: PathBuf },

    #[error("summaries directory does not exist: {path:?}")]
    SummariesDirNotFound { path: PathBuf },

    #[error("invalid frontmatter in {path:?}: {reason}")]
    InvalidFrontmatter { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("generation request failed: {reason}")]
    Generation { reason: String },

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl RecapError {
    /// Create an error for a failed operation with context
    pub fn operation(operation: &str, error: impl std::fmt::Display) -> Self {
        RecapError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        RecapError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RecapError::UsageError(_) | RecapError::InvalidValue { .. } => ExitCode::Usage,

            RecapError::VaultNotFound { .. }
            | RecapError::NotADirectory { .. }
            | RecapError::SummariesDirNotFound { .. }
            | RecapError::InvalidFrontmatter { .. } => ExitCode::Data,

            RecapError::Io(_)
            | RecapError::Yaml(_)
            | RecapError::Json(_)
            | RecapError::Toml(_)
            | RecapError::Generation { .. }
            | RecapError::FailedOperation { .. }
            | RecapError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            RecapError::UsageError(_) => "usage_error",
            RecapError::InvalidValue { .. } => "invalid_value",
            RecapError::VaultNotFound { .. } => "vault_not_found",
            RecapError::NotADirectory { .. } => "not_a_directory",
            RecapError::SummariesDirNotFound { .. } => "summaries_dir_not_found",
            RecapError::InvalidFrontmatter { .. } => "invalid_frontmatter",
            RecapError::Io(_) => "io_error",
            RecapError::Yaml(_) => "yaml_error",
            RecapError::Json(_) => "json_error",
            RecapError::Toml(_) => "toml_error",
            RecapError::Generation { .. } => "generation_error",
            RecapError::FailedOperation { .. } => "failed_operation",
            RecapError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for recap operations
pub type Result<T> = std::result::Result<T, RecapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(
            RecapError::UsageError("bad flag".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            RecapError::VaultNotFound {
                path: PathBuf::from("/nope")
            }
            .exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            RecapError::Other("boom".into()).exit_code(),
            ExitCode::Failure
        );
    }

    #[test]
    fn test_to_json_envelope() {
        let err = RecapError::SummariesDirNotFound {
            path: PathBuf::from("/vault/Summaries"),
        };
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "summaries_dir_not_found");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Summaries"));
    }
}
