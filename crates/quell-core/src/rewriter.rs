//! Per-unit rewrite requests.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use quell_protocols::{CapabilityError, CapabilityKind, CapabilitySession, SessionOutput, SessionRequest};

use crate::error::QuellError;
use crate::session::SessionManager;

/// Instruction sent with every rewrite request.
pub const NEUTRALIZE_INSTRUCTION: &str = "Rewrite the text to remove subjective, emotional, \
    and absolute language. Keep every factual claim and keep roughly the same length.";

/// Produces the neutral version of one unit's text.
#[async_trait]
pub trait UnitRewriter: Send + Sync {
    async fn rewrite(&self, text: &str) -> Result<String, QuellError>;
}

/// Rewriter backed by live rewrite (and optionally proofread) sessions.
pub struct SessionRewriter {
    rewrite: Arc<dyn CapabilitySession>,
    proofread: Option<Arc<dyn CapabilitySession>>,
    instruction: String,
}

impl SessionRewriter {
    pub fn new(
        rewrite: Arc<dyn CapabilitySession>,
        proofread: Option<Arc<dyn CapabilitySession>>,
    ) -> Self {
        Self {
            rewrite,
            proofread,
            instruction: NEUTRALIZE_INSTRUCTION.to_string(),
        }
    }

    /// Take the sessions prepared by `sessions`.
    ///
    /// Fails when no rewrite session is ready. The proofreader is used only
    /// when requested and ready.
    pub fn from_manager(sessions: &SessionManager, use_proofread: bool) -> Result<Self, QuellError> {
        let rewrite = sessions
            .session(CapabilityKind::Rewrite)
            .ok_or(QuellError::RewriterNotReady)?;
        let proofread = if use_proofread {
            sessions.session(CapabilityKind::Proofread)
        } else {
            None
        };
        Ok(Self::new(rewrite, proofread))
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn has_proofreader(&self) -> bool {
        self.proofread.is_some()
    }

    async fn proofread(&self, session: &dyn CapabilitySession, text: String) -> String {
        match session.invoke(SessionRequest::text(text.clone())).await {
            Ok(SessionOutput::Text(corrected)) => corrected,
            Ok(SessionOutput::Structured(_)) => {
                debug!("Proofreader returned structured output, keeping rewrite");
                text
            }
            Err(e) => {
                debug!(error = %e, "Proofread failed, keeping rewrite");
                text
            }
        }
    }
}

#[async_trait]
impl UnitRewriter for SessionRewriter {
    async fn rewrite(&self, text: &str) -> Result<String, QuellError> {
        let request = SessionRequest::text(text.trim()).with_context(self.instruction.as_str());
        let rewritten = match self.rewrite.invoke(request).await? {
            SessionOutput::Text(text) => text,
            SessionOutput::Structured(value) => {
                return Err(CapabilityError::UnexpectedOutput(value.to_string()).into());
            }
        };

        let finished = match &self.proofread {
            Some(session) => self.proofread(session.as_ref(), rewritten).await,
            None => rewritten,
        };
        Ok(finished.trim().to_string())
    }
}
