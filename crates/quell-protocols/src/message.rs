//! Cross-context message types.
//!
//! Three isolated contexts talk to each other only through these shapes:
//! a UI surface asks the coordinator, the coordinator asks the content-side
//! pipeline. Every request gets exactly one [`QuellResponse`].

use serde::{Deserialize, Serialize};

/// Requests sent from a UI surface to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum UiRequest {
    /// Read the persisted toggle flag.
    GetToggleState,
    /// Turn page quelling on or off.
    #[serde(rename_all = "camelCase")]
    Toggle { new_state: bool },
}

/// Requests sent from the coordinator to the content-side pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ContentRequest {
    #[serde(rename_all = "camelCase")]
    RunFullQuell { is_active: bool },
}

/// Answer to [`UiRequest::GetToggleState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleStateResponse {
    pub active: bool,
}

/// Answer to a toggle or a full-quell request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuellResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes_made: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuellResponse {
    /// Successful response carrying the number of changed units.
    pub fn success(changes_made: usize) -> Self {
        Self {
            success: true,
            changes_made: Some(changes_made),
            error: None,
        }
    }

    /// Failed response with a human-readable message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            changes_made: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
