//! Capability kinds and availability.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The external AI capabilities the pipeline can chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    /// General prompting model (bias scoring, test prompts).
    Prompt,
    /// Rewriting model (neutral rewrite).
    Rewrite,
    /// Proofreading model (post-rewrite cleanup).
    Proofread,
    /// Summarizing model (key points).
    Summarize,
}

impl CapabilityKind {
    /// Every capability kind, in a stable order.
    pub const ALL: [CapabilityKind; 4] = [
        CapabilityKind::Prompt,
        CapabilityKind::Rewrite,
        CapabilityKind::Proofread,
        CapabilityKind::Summarize,
    ];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Rewrite => "rewrite",
            Self::Proofread => "proofread",
            Self::Summarize => "summarize",
        }
    }

    /// Whether a creation failure for this kind must abort an activation.
    pub fn is_essential(&self) -> bool {
        matches!(self, Self::Rewrite)
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability of a capability in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Ready to create sessions immediately.
    Available,
    /// Present but must be fetched before the first session is ready.
    Downloadable,
    /// Not present at all.
    Unavailable,
}

impl Availability {
    /// Whether a session can be created (possibly after a download).
    pub fn is_usable(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rewrite_is_essential() {
        let essential: Vec<_> = CapabilityKind::ALL
            .iter()
            .filter(|k| k.is_essential())
            .collect();
        assert_eq!(essential, vec![&CapabilityKind::Rewrite]);
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&CapabilityKind::Proofread).unwrap();
        assert_eq!(json, "\"proofread\"");
        assert_eq!(CapabilityKind::Summarize.to_string(), "summarize");
    }

    #[test]
    fn test_availability_is_usable() {
        assert!(Availability::Available.is_usable());
        assert!(Availability::Downloadable.is_usable());
        assert!(!Availability::Unavailable.is_usable());
    }
}
