//! OpenAI capability provider implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use quell_protocols::{
    Availability, CapabilityError, CapabilityKind, CapabilityProvider, CapabilitySession,
    SessionConfig, SessionRequest,
};

use crate::api::{ApiRequest, ResponseFormat};
use crate::converter::convert_request;
use crate::session::OpenAISession;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Connection details shared by every session of one provider.
pub(crate) struct Endpoint {
    pub(crate) api_key: String,
    pub(crate) api_url: String,
    pub(crate) model: String,
    pub(crate) temperature: Option<f32>,
    client: reqwest::Client,
}

impl Endpoint {
    pub(crate) fn build_request(
        &self,
        config: &SessionConfig,
        request: &SessionRequest,
        stream: bool,
    ) -> ApiRequest {
        let temperature = match config {
            SessionConfig::Prompt(options) => options.temperature.or(self.temperature),
            _ => self.temperature,
        };
        ApiRequest {
            model: self.model.clone(),
            messages: convert_request(config, request),
            temperature,
            stream: Some(stream),
            response_format: request
                .response_constraint
                .clone()
                .map(ResponseFormat::json_schema),
        }
    }

    pub(crate) async fn send_request(
        &self,
        api_request: &ApiRequest,
    ) -> Result<reqwest::Response, CapabilityError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| CapabilityError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(CapabilityError::ApiError { status, message: text });
        }

        Ok(response)
    }
}

/// Capability provider backed by an OpenAI-compatible chat endpoint.
pub struct OpenAIProvider {
    endpoint: Arc<Endpoint>,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, DEFAULT_API_URL.to_string())
    }

    /// Create provider with custom API URL (for OpenAI-compatible APIs).
    pub fn with_url(api_key: String, api_url: String) -> Self {
        Self::with_options(api_key, api_url, DEFAULT_MODEL.to_string(), None)
    }

    pub fn with_options(
        api_key: String,
        api_url: String,
        model: String,
        temperature: Option<f32>,
    ) -> Self {
        Self {
            endpoint: Arc::new(Endpoint {
                api_key,
                api_url,
                model,
                temperature,
                client: reqwest::Client::new(),
            }),
        }
    }

    pub fn model(&self) -> &str {
        &self.endpoint.model
    }

    pub fn api_url(&self) -> &str {
        &self.endpoint.api_url
    }
}

#[async_trait]
impl CapabilityProvider for OpenAIProvider {
    fn id(&self) -> &str {
        "openai"
    }

    async fn availability(&self, _kind: CapabilityKind) -> Availability {
        if self.endpoint.api_key.is_empty() {
            Availability::Unavailable
        } else {
            Availability::Available
        }
    }

    async fn create_session(
        &self,
        config: SessionConfig,
    ) -> Result<Arc<dyn CapabilitySession>, CapabilityError> {
        let kind = config.kind();
        if self.endpoint.api_key.is_empty() {
            return Err(CapabilityError::CreationFailed {
                kind,
                message: "no API key configured".to_string(),
            });
        }
        debug!(%kind, model = %self.endpoint.model, "Creating OpenAI session");
        Ok(Arc::new(OpenAISession::new(Arc::clone(&self.endpoint), config)))
    }
}
