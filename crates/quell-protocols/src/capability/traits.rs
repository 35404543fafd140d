//! Capability provider and session traits.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Availability, CapabilityKind, OutputStream, SessionConfig, SessionOutput, SessionRequest};
use crate::error::CapabilityError;

/// Source of capability sessions (a real model client or a deterministic stub).
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Reports whether a capability kind is present in the host.
    async fn availability(&self, kind: CapabilityKind) -> Availability;

    /// Create a new session for the kind named by `config`.
    async fn create_session(
        &self,
        config: SessionConfig,
    ) -> Result<Arc<dyn CapabilitySession>, CapabilityError>;
}

/// A live handle to one external capability.
#[async_trait]
pub trait CapabilitySession: Send + Sync {
    /// Kind of capability behind this session.
    fn kind(&self) -> CapabilityKind;

    /// Invoke the capability and wait for the full output.
    async fn invoke(&self, request: SessionRequest) -> Result<SessionOutput, CapabilityError>;

    /// Invoke the capability as a stream of text chunks.
    ///
    /// The default yields the whole non-streaming output as one chunk.
    async fn invoke_stream(&self, request: SessionRequest) -> Result<OutputStream, CapabilityError> {
        let text = match self.invoke(request).await? {
            SessionOutput::Text(text) => text,
            SessionOutput::Structured(value) => value.to_string(),
        };
        Ok(Box::pin(futures::stream::once(async move { Ok(text) })))
    }

    /// Release the session. Further invocations fail.
    async fn destroy(&self);

    /// Whether `destroy` has been called.
    fn is_destroyed(&self) -> bool;
}
