//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.quell`).
    pub fn expand_path(path: &Path) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.page.batch_size, 15);
        assert_eq!(config.page.min_text_length, 20);
    }

    #[test]
    fn test_load_page_section() {
        let content = r#"
            [page]
            min_text_length = 30
            batch_size = 10
            yield_ms = 100
            include_containers = true
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.page.min_text_length, 30);
        assert_eq!(config.page.batch_size, 10);
        assert_eq!(config.page.yield_ms, 100);
        assert!(config.page.include_containers);
        assert!(config.page.proofread);
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [orchestrator]
            min_selection_length = 80
            summarize = false

            [provider]
            kind = "lexicon"

            [storage]
            state_path = "/tmp/quell/state.json"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.orchestrator.min_selection_length, 80);
        assert!(!config.orchestrator.summarize);
        assert_eq!(config.provider.kind, "lexicon");
        assert_eq!(
            config.storage.state_path,
            PathBuf::from("/tmp/quell/state.json")
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[page]").unwrap();
        writeln!(file, "batch_size = 5").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.page.batch_size, 5);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/quell.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_nonexistent_file() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/quell.toml")).unwrap();
        assert_eq!(config.page.batch_size, 15);
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("QUELL_TEST_CONFIG_VAR", "sk-test");
        }
        let content = "api_key = \"${QUELL_TEST_CONFIG_VAR}\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert!(expanded.contains("sk-test"));
        unsafe {
            std::env::remove_var("QUELL_TEST_CONFIG_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${QUELL_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path(Path::new("~/state.json"));
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with("state.json"));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = Path::new("/var/lib/quell");
        assert_eq!(ConfigLoader::expand_path(path), path);
    }
}
