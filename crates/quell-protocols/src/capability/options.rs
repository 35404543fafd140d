//! Session creation options, one set per capability kind.

use serde::{Deserialize, Serialize};

use super::CapabilityKind;

/// Tone requested from the rewriter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriteTone {
    #[default]
    AsIs,
    MoreFormal,
    MoreCasual,
}

/// Length requested from the rewriter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriteLength {
    #[default]
    AsIs,
    Shorter,
    Longer,
}

/// Output text format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextFormat {
    #[default]
    AsIs,
    PlainText,
    Markdown,
}

/// Kind of summary to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryType {
    #[default]
    KeyPoints,
    Tldr,
    Teaser,
    Headline,
}

/// Summary length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryLength {
    #[default]
    Short,
    Medium,
    Long,
}

/// Options for a prompt session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptOptions {
    /// Initial system prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Options for a rewrite session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewriteOptions {
    #[serde(default)]
    pub tone: RewriteTone,

    #[serde(default)]
    pub length: RewriteLength,

    #[serde(default)]
    pub format: TextFormat,

    /// Context shared by every rewrite issued through the session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_context: Option<String>,
}

/// Options for a proofread session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProofreadOptions {
    #[serde(default)]
    pub expected_input_languages: Vec<String>,
}

/// Options for a summarize session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeOptions {
    #[serde(default)]
    pub summary_type: SummaryType,

    #[serde(default)]
    pub format: TextFormat,

    #[serde(default)]
    pub length: SummaryLength,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_context: Option<String>,
}

/// Configuration used to create a session of a given kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionConfig {
    Prompt(PromptOptions),
    Rewrite(RewriteOptions),
    Proofread(ProofreadOptions),
    Summarize(SummarizeOptions),
}

impl SessionConfig {
    /// Capability kind the config creates.
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Self::Prompt(_) => CapabilityKind::Prompt,
            Self::Rewrite(_) => CapabilityKind::Rewrite,
            Self::Proofread(_) => CapabilityKind::Proofread,
            Self::Summarize(_) => CapabilityKind::Summarize,
        }
    }

    /// Default config for a kind.
    pub fn default_for(kind: CapabilityKind) -> Self {
        match kind {
            CapabilityKind::Prompt => Self::Prompt(PromptOptions::default()),
            CapabilityKind::Rewrite => Self::Rewrite(RewriteOptions::default()),
            CapabilityKind::Proofread => Self::Proofread(ProofreadOptions::default()),
            CapabilityKind::Summarize => Self::Summarize(SummarizeOptions::default()),
        }
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
