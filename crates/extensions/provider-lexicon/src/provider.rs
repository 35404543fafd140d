//! Lexicon-backed capability provider.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use quell_protocols::capability::{PromptRole, SummarizeOptions, SummaryLength, SummaryType};
use quell_protocols::{
    Availability, CapabilityError, CapabilityKind, CapabilityProvider, CapabilitySession,
    SessionConfig, SessionInput, SessionOutput, SessionRequest,
};

use crate::lexicon::Lexicon;
use crate::summary::lead_sentences;

/// Score added per sensational word found.
const SCORE_PER_HIT: usize = 2;
const MAX_SCORE: usize = 10;

/// Deterministic provider serving every capability from a [`Lexicon`].
pub struct LexiconProvider {
    lexicon: Arc<Lexicon>,
    missing: BTreeSet<CapabilityKind>,
}

impl LexiconProvider {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
            missing: BTreeSet::new(),
        }
    }

    /// Report `kind` as unavailable.
    pub fn without(mut self, kind: CapabilityKind) -> Self {
        self.missing.insert(kind);
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl Default for LexiconProvider {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}

#[async_trait]
impl CapabilityProvider for LexiconProvider {
    fn id(&self) -> &str {
        "lexicon"
    }

    async fn availability(&self, kind: CapabilityKind) -> Availability {
        if self.missing.contains(&kind) {
            Availability::Unavailable
        } else {
            Availability::Available
        }
    }

    async fn create_session(
        &self,
        config: SessionConfig,
    ) -> Result<Arc<dyn CapabilitySession>, CapabilityError> {
        let kind = config.kind();
        if self.missing.contains(&kind) {
            return Err(CapabilityError::Unavailable(kind));
        }
        debug!(%kind, entries = self.lexicon.len(), "Creating lexicon session");
        Ok(Arc::new(LexiconSession {
            config,
            lexicon: Arc::clone(&self.lexicon),
            destroyed: AtomicBool::new(false),
        }))
    }
}

/// One session of the lexicon provider.
pub struct LexiconSession {
    config: SessionConfig,
    lexicon: Arc<Lexicon>,
    destroyed: AtomicBool,
}

impl LexiconSession {
    fn score(&self, request: &SessionRequest) -> SessionOutput {
        let text = user_text(&request.input);
        let max_words = request
            .response_constraint
            .as_ref()
            .and_then(|schema| schema.pointer("/properties/hypeWords/maxItems"))
            .and_then(|max| max.as_u64())
            .map(|max| max as usize)
            .unwrap_or(usize::MAX);
        let score = (self.lexicon.hits(&text) * SCORE_PER_HIT).min(MAX_SCORE);
        let hype_words: Vec<String> = self
            .lexicon
            .hype_words(&text)
            .into_iter()
            .take(max_words)
            .collect();
        SessionOutput::Structured(json!({
            "emotionScore": score,
            "hypeWords": hype_words,
        }))
    }

    fn summarize(&self, options: &SummarizeOptions, text: &str) -> String {
        let limit = match options.length {
            SummaryLength::Short => 3,
            SummaryLength::Medium => 5,
            SummaryLength::Long => 7,
        };
        match options.summary_type {
            SummaryType::KeyPoints => lead_sentences(text, limit)
                .into_iter()
                .map(|sentence| format!("- {sentence}"))
                .collect::<Vec<_>>()
                .join("\n"),
            SummaryType::Tldr | SummaryType::Teaser | SummaryType::Headline => {
                lead_sentences(text, 1).into_iter().next().unwrap_or_default()
            }
        }
    }
}

#[async_trait]
impl CapabilitySession for LexiconSession {
    fn kind(&self) -> CapabilityKind {
        self.config.kind()
    }

    async fn invoke(&self, request: SessionRequest) -> Result<SessionOutput, CapabilityError> {
        if self.is_destroyed() {
            return Err(CapabilityError::SessionDestroyed(self.kind()));
        }

        let output = match &self.config {
            SessionConfig::Prompt(_) if request.response_constraint.is_some() => {
                self.score(&request)
            }
            SessionConfig::Prompt(_) | SessionConfig::Rewrite(_) => {
                SessionOutput::Text(self.lexicon.neutralize(&user_text(&request.input)))
            }
            SessionConfig::Proofread(_) => SessionOutput::Text(request.input.to_text()),
            SessionConfig::Summarize(options) => {
                SessionOutput::Text(self.summarize(options, &request.input.to_text()))
            }
        };
        Ok(output)
    }

    async fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

/// The text a user supplied, without system or assistant turns.
fn user_text(input: &SessionInput) -> String {
    match input {
        SessionInput::Text(text) => text.clone(),
        SessionInput::Messages(messages) => messages
            .iter()
            .filter(|m| m.role == PromptRole::User)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
