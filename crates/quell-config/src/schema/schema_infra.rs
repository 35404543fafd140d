//! Infrastructure configuration types (provider, storage, logging).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Provider kinds the binary knows how to build.
pub const PROVIDER_KINDS: [&str; 2] = ["openai", "lexicon"];

/// Capability provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider kind ("openai" or "lexicon").
    #[serde(default = "default_provider_kind")]
    pub kind: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Sampling temperature for prompt sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_provider_kind(),
            model: default_model(),
            api_key: None,
            base_url: None,
            temperature: None,
        }
    }
}

fn default_provider_kind() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Persistent storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File holding the persisted toggle flag.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
        }
    }
}

fn default_state_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".quell").join("state.json"))
        .unwrap_or_else(|| PathBuf::from(".quell/state.json"))
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write a daily rolling log file.
    #[serde(default)]
    pub file: bool,

    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: false,
            directory: default_log_directory(),
        }
    }
}

fn default_log_directory() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".quell").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".quell/logs"))
}
