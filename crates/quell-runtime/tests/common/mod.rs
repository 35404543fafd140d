//! Shared fixtures for runtime integration tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use quell_protocols::{
    Availability, CapabilityError, CapabilityKind, CapabilityProvider, CapabilitySession,
    SessionConfig, SessionOutput, SessionRequest,
};

/// Replaces loaded words with calmer ones; leaves everything else alone.
pub struct WordSwapProvider {
    pub unavailable: HashSet<CapabilityKind>,
    pub swaps: Vec<(&'static str, &'static str)>,
    pub destroyed: Arc<AtomicUsize>,
}

impl WordSwapProvider {
    pub fn new(swaps: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            unavailable: HashSet::new(),
            swaps,
            destroyed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn without(mut self, kind: CapabilityKind) -> Self {
        self.unavailable.insert(kind);
        self
    }
}

#[async_trait]
impl CapabilityProvider for WordSwapProvider {
    fn id(&self) -> &str {
        "word-swap"
    }

    async fn availability(&self, kind: CapabilityKind) -> Availability {
        if self.unavailable.contains(&kind) {
            Availability::Unavailable
        } else {
            Availability::Available
        }
    }

    async fn create_session(
        &self,
        config: SessionConfig,
    ) -> Result<Arc<dyn CapabilitySession>, CapabilityError> {
        Ok(Arc::new(WordSwapSession {
            kind: config.kind(),
            swaps: self.swaps.clone(),
            destroyed: AtomicBool::new(false),
            destroy_count: Arc::clone(&self.destroyed),
        }))
    }
}

struct WordSwapSession {
    kind: CapabilityKind,
    swaps: Vec<(&'static str, &'static str)>,
    destroyed: AtomicBool,
    destroy_count: Arc<AtomicUsize>,
}

#[async_trait]
impl CapabilitySession for WordSwapSession {
    fn kind(&self) -> CapabilityKind {
        self.kind
    }

    async fn invoke(&self, request: SessionRequest) -> Result<SessionOutput, CapabilityError> {
        if self.is_destroyed() {
            return Err(CapabilityError::SessionDestroyed(self.kind));
        }
        let mut text = request.input.to_text();
        if self.kind == CapabilityKind::Rewrite {
            for (from, to) in &self.swaps {
                text = text.replace(from, to);
            }
        }
        Ok(SessionOutput::Text(text))
    }

    async fn destroy(&self) {
        if !self.destroyed.swap(true, Ordering::SeqCst) {
            self.destroy_count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

/// A page with 12 qualifying paragraphs, 4 of which carry loaded words,
/// plus short blocks the selector must skip.
pub fn news_page() -> String {
    let mut body = String::from("<h1>City News</h1><p>Short.</p><li>Tiny item</li>");
    for i in 0..12 {
        let paragraph = if i % 3 == 0 {
            format!("<p>Paragraph {i}: the council made an outrageous decision on the budget.</p>")
        } else {
            format!("<p>Paragraph {i}: the council met on Tuesday to discuss the budget.</p>")
        };
        body.push_str(&paragraph);
    }
    format!("<html><body><article>{body}</article><script>var x = 1;</script></body></html>")
}

pub fn swaps() -> Vec<(&'static str, &'static str)> {
    vec![("outrageous", "contested")]
}
