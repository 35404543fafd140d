//! AI capability errors.

use thiserror::Error;

use crate::capability::CapabilityKind;

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("Capability unavailable: {0}")]
    Unavailable(CapabilityKind),

    #[error("Failed to create {kind} session: {message}")]
    CreationFailed { kind: CapabilityKind, message: String },

    #[error("{kind} invocation failed: {message}")]
    InvocationFailed { kind: CapabilityKind, message: String },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("Session already destroyed: {0}")]
    SessionDestroyed(CapabilityKind),

    #[error("Unexpected output: {0}")]
    UnexpectedOutput(String),
}

impl CapabilityError {
    /// Returns true when the capability is simply not present in the host.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
