//! One capability session over the chat endpoint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use quell_protocols::{
    CapabilityError, CapabilityKind, CapabilitySession, OutputStream, SessionConfig,
    SessionOutput, SessionRequest,
};

use crate::api::ApiResponse;
use crate::provider::Endpoint;
use crate::sse::SseDecoder;

/// Chat-backed session for a single capability kind.
pub struct OpenAISession {
    endpoint: Arc<Endpoint>,
    config: SessionConfig,
    destroyed: AtomicBool,
}

impl OpenAISession {
    pub(crate) fn new(endpoint: Arc<Endpoint>, config: SessionConfig) -> Self {
        Self {
            endpoint,
            config,
            destroyed: AtomicBool::new(false),
        }
    }

    fn ensure_live(&self) -> Result<(), CapabilityError> {
        if self.is_destroyed() {
            return Err(CapabilityError::SessionDestroyed(self.kind()));
        }
        Ok(())
    }
}

#[async_trait]
impl CapabilitySession for OpenAISession {
    fn kind(&self) -> CapabilityKind {
        self.config.kind()
    }

    async fn invoke(&self, request: SessionRequest) -> Result<SessionOutput, CapabilityError> {
        self.ensure_live()?;
        let api_request = self.endpoint.build_request(&self.config, &request, false);
        let response = self.endpoint.send_request(&api_request).await?;
        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| CapabilityError::Network(e.to_string()))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CapabilityError::InvocationFailed {
                kind: self.kind(),
                message: "response had no content".to_string(),
            })?;

        if request.response_constraint.is_some() {
            if let Ok(value) = serde_json::from_str(&content) {
                return Ok(SessionOutput::Structured(value));
            }
        }
        Ok(SessionOutput::Text(content))
    }

    async fn invoke_stream(&self, request: SessionRequest) -> Result<OutputStream, CapabilityError> {
        self.ensure_live()?;
        let api_request = self.endpoint.build_request(&self.config, &request, true);
        let response = self.endpoint.send_request(&api_request).await?;

        let mut decoder = SseDecoder::default();
        let stream = response
            .bytes_stream()
            .map(move |result| match result {
                Ok(bytes) => decoder.push(&bytes),
                Err(e) => vec![Err(CapabilityError::StreamError(e.to_string()))],
            })
            .flat_map(futures::stream::iter);

        Ok(Box::pin(stream))
    }

    async fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
