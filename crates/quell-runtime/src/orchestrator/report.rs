//! Final composed output of a selection or article run.

use std::fmt::Write;

use serde::Serialize;

use super::assessment::BiasAssessment;
use super::PipelineMode;

/// Result of the bias-scoring stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BiasOutcome {
    Scored(BiasAssessment),
    /// Scoring failed; the run continued with a placeholder.
    Unavailable,
    /// Scoring was turned off in the configuration.
    Disabled,
}

/// Everything shown to the user after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuellReport {
    pub mode: PipelineMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub input_chars: usize,
    pub bias: BiasOutcome,
    pub neutral_text: String,
    pub key_points: Vec<String>,
}

impl QuellReport {
    /// Plain-text rendering for terminals and panels.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            let _ = writeln!(out, "{title}\n");
        }

        match &self.bias {
            BiasOutcome::Scored(assessment) => {
                let _ = writeln!(
                    out,
                    "Emotion score: {} (-10 negative, 0 neutral, 10 positive)",
                    assessment.emotion_score
                );
                if assessment.hype_words.is_empty() {
                    out.push_str("Hype words: none\n");
                } else {
                    let _ = writeln!(out, "Hype words: {}", assessment.hype_words.join(", "));
                }
                out.push('\n');
            }
            BiasOutcome::Unavailable => out.push_str("Emotion score: unavailable\n\n"),
            BiasOutcome::Disabled => {}
        }

        let _ = writeln!(out, "Neutral version:\n{}", self.neutral_text);

        if !self.key_points.is_empty() {
            out.push_str("\nKey points:\n");
            for point in &self.key_points {
                let _ = writeln!(out, "- {point}");
            }
        }
        out
    }
}

/// Split summarizer output into bullet lines.
pub(crate) fn key_points(summary: &str) -> Vec<String> {
    summary
        .lines()
        .map(|line| strip_bullet(line.trim()))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim_start_matches(['-', '*', '\u{2022}']);
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    let line = if digits > 0 && line[digits..].starts_with(['.', ')']) {
        &line[digits + 1..]
    } else {
        line
    };
    line.trim()
}
