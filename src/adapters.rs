//! Configuration and provider wiring for the binary.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use quell_config::{Config, ConfigLoader, ConfigValidator, ProviderConfig};
use quell_protocols::CapabilityProvider;
use quell_provider_lexicon::{Lexicon, LexiconProvider};
use quell_provider_openai::{OpenAIProvider, DEFAULT_API_URL};

/// Environment variable consulted when the config carries no API key.
pub(crate) const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Reject invalid configs and log the warnings of valid ones.
pub(crate) fn validate_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let warnings = ConfigValidator::validate(config).into_result()?;
    for warning in warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }
    Ok(())
}

/// Build the capability provider named by the config.
///
/// `offline` forces the lexicon provider whatever the config says.
pub(crate) fn build_provider(
    config: &ProviderConfig,
    offline: bool,
    lexicon: Option<&Path>,
) -> Result<Arc<dyn CapabilityProvider>, Box<dyn std::error::Error>> {
    if offline || config.kind == "lexicon" {
        let lexicon = match lexicon {
            Some(path) => Lexicon::load(&ConfigLoader::expand_path(path))?,
            None => Lexicon::builtin(),
        };
        info!(entries = lexicon.len(), "Using lexicon provider");
        return Ok(Arc::new(LexiconProvider::new(lexicon)));
    }

    let api_key = resolve_api_key(config.api_key.as_deref(), std::env::var(API_KEY_ENV).ok());
    if api_key.is_empty() {
        warn!("No API key configured, capabilities will report unavailable");
    }
    let api_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    info!(model = %config.model, url = %api_url, "Using OpenAI provider");
    Ok(Arc::new(OpenAIProvider::with_options(
        api_key,
        api_url,
        config.model.clone(),
        config.temperature,
    )))
}

fn resolve_api_key(configured: Option<&str>, from_env: Option<String>) -> String {
    configured
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .or(from_env)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_api_key_prefers_config() {
        assert_eq!(resolve_api_key(Some("cfg"), Some("env".to_string())), "cfg");
        assert_eq!(resolve_api_key(Some(""), Some("env".to_string())), "env");
        assert_eq!(resolve_api_key(None, None), "");
    }

    #[test]
    fn test_offline_forces_lexicon() {
        let provider = build_provider(&ProviderConfig::default(), true, None).unwrap();
        assert_eq!(provider.id(), "lexicon");
    }

    #[test]
    fn test_lexicon_kind_from_config() {
        let config = ProviderConfig {
            kind: "lexicon".to_string(),
            ..Default::default()
        };
        assert_eq!(build_provider(&config, false, None).unwrap().id(), "lexicon");
    }

    #[test]
    fn test_openai_kind() {
        let config = ProviderConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert_eq!(build_provider(&config, false, None).unwrap().id(), "openai");
    }

    #[test]
    fn test_custom_lexicon_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[words]\nfury = \"concern\"").unwrap();
        let provider = build_provider(&ProviderConfig::default(), true, Some(file.path())).unwrap();
        assert_eq!(provider.id(), "lexicon");
    }

    #[test]
    fn test_missing_lexicon_file_is_error() {
        let result = build_provider(
            &ProviderConfig::default(),
            true,
            Some(Path::new("/nonexistent/words.toml")),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_invalid() {
        let config = ConfigLoader::load_str("[page]\nbatch_size = 0").unwrap();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/quell.toml")).unwrap();
        assert!(validate_config(&config).is_ok());
    }
}
