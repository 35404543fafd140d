//! Runtime errors.

use thiserror::Error;

use quell_core::QuellError;
use quell_protocols::CapabilityError;

use crate::orchestrator::Stage;

/// Toggle state persistence errors.
#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Selection and article pipeline errors.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Input too short: {actual} characters, at least {min} required")]
    InputTooShort { min: usize, actual: usize },

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: CapabilityError,
    },

    #[error(transparent)]
    Extraction(#[from] QuellError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use quell_protocols::CapabilityKind;

    #[test]
    fn test_input_too_short_display() {
        let err = OrchestratorError::InputTooShort { min: 50, actual: 12 };
        assert_eq!(
            err.to_string(),
            "Input too short: 12 characters, at least 50 required"
        );
    }

    #[test]
    fn test_stage_error_display() {
        let err = OrchestratorError::Stage {
            stage: Stage::Rewrite,
            source: CapabilityError::Unavailable(CapabilityKind::Rewrite),
        };
        assert_eq!(
            err.to_string(),
            "Rewrite stage failed: Capability unavailable: rewrite"
        );
    }
}
