//! HTTP client for the Ollama generation endpoint

use std::time::Duration;

use crate::error::{RecapError, Result};

/// Sampling temperature for summaries; low for consistency
const TEMPERATURE: f64 = 0.3;
const TOP_P: f64 = 0.9;

/// Anything that can turn a prompt into generated text.
///
/// The single seam between the core and the generation service; tests
/// substitute a stub here.
pub trait TextGenerator {
    /// Model identifier, for reporting
    fn model(&self) -> &str;

    /// Generate a completion for the prompt
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Synchronous client for a local Ollama server
#[derive(Debug, Clone)]
pub struct OllamaClient {
    host: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    /// Create a client for the given host (e.g. `http://localhost:11434`)
    pub fn new(host: &str, model: &str, timeout_seconds: u64) -> Self {
        OllamaClient {
            host: host.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// Check that the server is reachable and the model is available
    pub fn test_connection(&self) -> bool {
        let url = format!("{}/api/tags", self.host);
        let response = match ureq::get(&url).timeout(Duration::from_secs(10)).call() {
            Ok(res) => res,
            Err(e) => {
                tracing::warn!(error = %e, host = %self.host, "connection test failed");
                return false;
            }
        };

        let body: serde_json::Value = match response.into_json() {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "invalid response from server");
                return false;
            }
        };

        let available = body["models"]
            .as_array()
            .map(|models| {
                models
                    .iter()
                    .any(|m| m["name"].as_str() == Some(self.model.as_str()))
            })
            .unwrap_or(false);

        if !available {
            tracing::warn!(model = %self.model, "model not found on server");
        }
        available
    }
}

impl TextGenerator for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.host);
        let payload = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": TEMPERATURE,
                "top_p": TOP_P,
            }
        });

        let response = ureq::post(&url)
            .set("Content-Type", "application/json")
            .timeout(self.timeout)
            .send_string(&payload.to_string());

        let response = match response {
            Ok(res) => res,
            Err(ureq::Error::Status(code, _)) => {
                return Err(RecapError::Generation {
                    reason: format!("server returned status {}", code),
                });
            }
            Err(ureq::Error::Transport(e)) => {
                return Err(RecapError::Generation {
                    reason: format!("transport error: {}", e),
                });
            }
        };

        let body: serde_json::Value =
            response.into_json().map_err(|e| RecapError::Generation {
                reason: format!("invalid response body: {}", e),
            })?;

        Ok(body["response"].as_str().unwrap_or_default().trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_trailing_slash_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/", "llama2:7b", 60);
        assert_eq!(client.host, "http://localhost:11434");
        assert_eq!(client.model(), "llama2:7b");
    }
}
