//! Content pipeline errors.

use thiserror::Error;

use quell_protocols::CapabilityError;

use crate::document::UnitId;

/// Ledger contract violations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Unit {0} already has a ledger entry")]
    AlreadyRecorded(UnitId),

    #[error("Unknown unit: {0}")]
    UnknownUnit(UnitId),
}

/// Errors raised by the content-side pipeline.
#[derive(Debug, Error)]
pub enum QuellError {
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error("Rewriter session is not ready")]
    RewriterNotReady,

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("No readable article content found")]
    EmptyArticle,
}

/// Failures of the request/response channel to the content pipeline.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Content pipeline is not running")]
    Closed,

    #[error("Content pipeline dropped the request without responding")]
    NoResponse,

    #[error("No response from content pipeline after {0} seconds")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use quell_protocols::CapabilityKind;

    #[test]
    fn test_ledger_error_display() {
        let err = LedgerError::AlreadyRecorded(UnitId::new(3));
        assert_eq!(err.to_string(), "Unit unit-3 already has a ledger entry");
    }

    #[test]
    fn test_quell_error_wraps_capability_transparently() {
        let err = QuellError::from(CapabilityError::Unavailable(CapabilityKind::Rewrite));
        assert_eq!(err.to_string(), "Capability unavailable: rewrite");
    }

    #[test]
    fn test_channel_error_timeout_display() {
        let err = ChannelError::Timeout(120);
        assert!(err.to_string().contains("120 seconds"));
    }
}
