//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, PROVIDER_KINDS};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_page(config, &mut result);
        Self::validate_orchestrator(config, &mut result);
        Self::validate_coordinator(config, &mut result);
        Self::validate_provider(config, &mut result);

        result
    }

    fn validate_page(config: &Config, result: &mut ValidationResult) {
        if config.page.batch_size == 0 {
            result.add_error(ValidationError::new(
                "page.batch_size",
                "batch_size must be greater than 0",
            ));
        }

        if config.page.batch_size > 64 {
            result.add_warning(ValidationWarning::new(
                "page.batch_size",
                "batch_size is very high (>64), the capability host may throttle requests",
            ));
        }

        if config.page.min_text_length == 0 {
            result.add_error(ValidationError::new(
                "page.min_text_length",
                "min_text_length must be greater than 0",
            ));
        }

        if config.page.yield_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "page.yield_ms",
                "yield_ms is 0, batches will run back to back",
            ));
        }
    }

    fn validate_orchestrator(config: &Config, result: &mut ValidationResult) {
        let orchestrator = &config.orchestrator;

        if orchestrator.min_selection_length == 0 {
            result.add_error(ValidationError::new(
                "orchestrator.min_selection_length",
                "min_selection_length must be greater than 0",
            ));
        }

        if orchestrator.min_article_length == 0 {
            result.add_error(ValidationError::new(
                "orchestrator.min_article_length",
                "min_article_length must be greater than 0",
            ));
        }

        if orchestrator.max_hype_words == 0 {
            result.add_error(ValidationError::new(
                "orchestrator.max_hype_words",
                "max_hype_words must be greater than 0",
            ));
        }
    }

    fn validate_coordinator(config: &Config, result: &mut ValidationResult) {
        if config.coordinator.response_timeout_secs == 0 {
            result.add_warning(ValidationWarning::new(
                "coordinator.response_timeout_secs",
                "response_timeout_secs is 0, every toggle will report a lost response",
            ));
        }
    }

    fn validate_provider(config: &Config, result: &mut ValidationResult) {
        let provider = &config.provider;

        if !PROVIDER_KINDS.contains(&provider.kind.as_str()) {
            result.add_error(ValidationError::new(
                "provider.kind",
                format!(
                    "Unknown provider kind '{}', valid values: {:?}",
                    provider.kind, PROVIDER_KINDS
                ),
            ));
            return;
        }

        if provider.kind == "openai" && provider.api_key.is_none() {
            result.add_warning(ValidationWarning::new(
                "provider.api_key",
                "API key is not set, may need to be set via environment variable",
            ));
        }

        if let Some(ref url) = provider.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                result.add_error(ValidationError::new(
                    "provider.base_url",
                    "base_url must start with http:// or https://",
                ));
            }
        }

        if let Some(temperature) = provider.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                result.add_error(ValidationError::new(
                    "provider.temperature",
                    "temperature must be between 0.0 and 2.0",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
