//! Pipeline-related configuration types.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Whole-page quelling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Blocks whose trimmed text is this long or shorter are skipped.
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,

    /// Number of blocks rewritten concurrently per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between batches in milliseconds.
    #[serde(default = "default_yield_ms")]
    pub yield_ms: u64,

    /// Also select article/section/main containers without block children.
    #[serde(default)]
    pub include_containers: bool,

    /// Pipe rewrites through the proofreader when one is ready.
    #[serde(default = "default_true")]
    pub proofread: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            min_text_length: default_min_text_length(),
            batch_size: default_batch_size(),
            yield_ms: default_yield_ms(),
            include_containers: false,
            proofread: true,
        }
    }
}

fn default_min_text_length() -> usize {
    20
}

fn default_batch_size() -> usize {
    15
}

fn default_yield_ms() -> u64 {
    50
}

/// Selection and full-article pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    #[serde(default = "default_min_selection_length")]
    pub min_selection_length: usize,

    #[serde(default = "default_min_article_length")]
    pub min_article_length: usize,

    /// Run the bias scoring stage.
    #[serde(default = "default_true")]
    pub bias_scoring: bool,

    /// Run the key-point summary stage.
    #[serde(default = "default_true")]
    pub summarize: bool,

    #[serde(default = "default_max_hype_words")]
    pub max_hype_words: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            min_selection_length: default_min_selection_length(),
            min_article_length: default_min_article_length(),
            bias_scoring: true,
            summarize: true,
            max_hype_words: default_max_hype_words(),
        }
    }
}

fn default_min_selection_length() -> usize {
    50
}

fn default_min_article_length() -> usize {
    500
}

fn default_max_hype_words() -> usize {
    3
}

/// Toggle coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Seconds to wait for the content pipeline before treating the
    /// response as lost.
    #[serde(default = "default_response_timeout")]
    pub response_timeout_secs: u64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            response_timeout_secs: default_response_timeout(),
        }
    }
}

fn default_response_timeout() -> u64 {
    120
}
