//! Word table of sensational terms and their neutral replacements.

use std::collections::BTreeMap;
use std::path::Path;

use regex::{Captures, Regex};
use serde::Deserialize;
use thiserror::Error;

const BUILTIN: &[(&str, &str)] = &[
    ("absolutely", ""),
    ("blasted", "criticized"),
    ("brutal", "harsh"),
    ("catastrophic", "serious"),
    ("chaos", "disruption"),
    ("devastating", "severe"),
    ("disastrous", "poor"),
    ("explosive", "significant"),
    ("extremely", ""),
    ("furious", "displeased"),
    ("horrific", "serious"),
    ("incredible", "notable"),
    ("massive", "large"),
    ("outrageous", "disputed"),
    ("plummeted", "fell"),
    ("plunged", "fell"),
    ("shocking", "unexpected"),
    ("skyrocketed", "rose"),
    ("skyrocketing", "rising"),
    ("slammed", "criticized"),
    ("stunning", "notable"),
    ("unprecedented", "unusual"),
    ("very", ""),
];

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to read lexicon: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse lexicon: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid lexicon entry: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    words: BTreeMap<String, String>,
}

/// Case-insensitive table mapping sensational words to neutral ones.
///
/// An empty replacement drops the word.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: BTreeMap<String, String>,
    pattern: Option<Regex>,
}

impl Lexicon {
    /// Built-in English table.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().map(|(w, r)| (w.to_string(), r.to_string())))
            .unwrap_or_else(|_| Self::empty())
    }

    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            pattern: None,
        }
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, LexiconError> {
        let entries: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(word, replacement)| (word.trim().to_lowercase(), replacement.trim().to_string()))
            .filter(|(word, _)| !word.is_empty())
            .collect();

        if entries.is_empty() {
            return Ok(Self::empty());
        }

        // Longest first so multi-word entries win over their parts.
        let mut words: Vec<&str> = entries.keys().map(String::as_str).collect();
        words.sort_by_key(|w| std::cmp::Reverse(w.len()));
        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))?;

        Ok(Self {
            entries,
            pattern: Some(pattern),
        })
    }

    /// Parse a TOML table of the form `[words] outrageous = "disputed"`.
    pub fn from_toml_str(content: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = toml::from_str(content)?;
        Self::from_entries(file.words)
    }

    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn replacement(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    /// Replace every table word in `text`, keeping a leading capital.
    pub fn neutralize(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };
        let replaced = pattern.replace_all(text, |caps: &Captures<'_>| {
            let matched = &caps[0];
            let replacement = self.replacement(matched).unwrap_or(matched);
            match_case(matched, replacement)
        });
        let tidied = replaced.lines().map(tidy_line).collect::<Vec<_>>().join("\n");
        capitalize_first(&tidied, text)
    }

    /// Distinct table words found in `text`, lowercased, in order of
    /// first appearance.
    pub fn hype_words(&self, text: &str) -> Vec<String> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        let mut words: Vec<String> = Vec::new();
        for found in pattern.find_iter(text) {
            let word = found.as_str().to_lowercase();
            if !words.contains(&word) {
                words.push(word);
            }
        }
        words
    }

    /// Number of table words in `text`, counting repeats.
    pub fn hits(&self, text: &str) -> usize {
        self.pattern
            .as_ref()
            .map(|p| p.find_iter(text).count())
            .unwrap_or(0)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Collapse the gaps left by dropped words.
fn tidy_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for word in line.split_whitespace() {
        let attaches = word.starts_with([',', '.', ';', ':', '!', '?']);
        if !out.is_empty() && !attaches {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

fn match_case(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if starts_upper {
        upper_first(replacement)
    } else {
        replacement.to_string()
    }
}

fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Dropping a capitalized leading word leaves a lowercase start.
fn capitalize_first(text: &str, original: &str) -> String {
    let original_upper = original
        .trim_start()
        .chars()
        .next()
        .is_some_and(char::is_uppercase);
    if original_upper {
        upper_first(text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
#[path = "lexicon_tests.rs"]
mod tests;
