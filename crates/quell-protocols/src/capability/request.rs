//! Session request and output types.

use serde::{Deserialize, Serialize};

/// Role of a structured prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

/// One message of a structured prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

/// Input to a session: plain text or a structured message list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionInput {
    Text(String),
    Messages(Vec<PromptMessage>),
}

impl SessionInput {
    /// Flattens the input to text, joining message contents with blank lines.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Messages(messages) => messages
                .iter()
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

/// A single invocation of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub input: SessionInput,

    /// Per-call context (e.g. the rewrite instruction).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// JSON schema the response must conform to (prompt sessions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_constraint: Option<serde_json::Value>,
}

impl SessionRequest {
    /// Request with plain text input.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            input: SessionInput::Text(text.into()),
            context: None,
            response_constraint: None,
        }
    }

    /// Request with a structured message list.
    pub fn messages(messages: Vec<PromptMessage>) -> Self {
        Self {
            input: SessionInput::Messages(messages),
            context: None,
            response_constraint: None,
        }
    }

    /// Set the per-call context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Constrain the response to a JSON schema.
    pub fn with_response_constraint(mut self, schema: serde_json::Value) -> Self {
        self.response_constraint = Some(schema);
        self
    }
}

/// Output of a session invocation.
///
/// Most capabilities answer with text. Some (proofreading in particular)
/// may answer with a structured record instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionOutput {
    Text(String),
    Structured(serde_json::Value),
}

impl SessionOutput {
    /// Borrow the text, if this is a text output.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }

    /// Take the text, if this is a text output.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
