    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "provider.api_key"));
    }

    #[test]
    fn test_validate_zero_batch_size() {
        let mut config = Config::default();
        config.page.batch_size = 0;

        let result = ConfigValidator::validate(&config);
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "page.batch_size"));
    }

    #[test]
    fn test_validate_high_batch_size_warning() {
        let mut config = Config::default();
        config.page.batch_size = 200;

        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "page.batch_size"));
    }

    #[test]
    fn test_validate_zero_min_text_length() {
        let mut config = Config::default();
        config.page.min_text_length = 0;

        let result = ConfigValidator::validate(&config);
        assert!(result.errors.iter().any(|e| e.path == "page.min_text_length"));
    }

    #[test]
    fn test_validate_zero_yield_warning() {
        let mut config = Config::default();
        config.page.yield_ms = 0;

        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "page.yield_ms"));
    }

    #[test]
    fn test_validate_orchestrator_minimums() {
        let mut config = Config::default();
        config.orchestrator.min_selection_length = 0;
        config.orchestrator.min_article_length = 0;
        config.orchestrator.max_hype_words = 0;

        let result = ConfigValidator::validate(&config);
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn test_validate_unknown_provider_kind() {
        let mut config = Config::default();
        config.provider.kind = "local-llama".to_string();

        let result = ConfigValidator::validate(&config);
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "provider.kind"));
    }

    #[test]
    fn test_validate_lexicon_needs_no_key() {
        let mut config = Config::default();
        config.provider.kind = "lexicon".to_string();

        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.iter().all(|w| w.path != "provider.api_key"));
    }

    #[test]
    fn test_validate_invalid_base_url() {
        let mut config = Config::default();
        config.provider.api_key = Some("sk-test".to_string());
        config.provider.base_url = Some("invalid-url".to_string());

        let result = ConfigValidator::validate(&config);
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "provider.base_url"));
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut config = Config::default();
        config.provider.temperature = Some(3.5);

        let result = ConfigValidator::validate(&config);
        assert!(result.errors.iter().any(|e| e.path == "provider.temperature"));
    }

    #[test]
    fn test_into_result_reports_first_error() {
        let mut config = Config::default();
        config.page.batch_size = 0;

        let err = ConfigValidator::validate(&config).into_result().unwrap_err();
        assert!(err.to_string().contains("page.batch_size"));
    }

    #[test]
    fn test_into_result_returns_warnings() {
        let warnings = ConfigValidator::validate(&Config::default())
            .into_result()
            .unwrap();
        assert!(!warnings.is_empty());
    }
