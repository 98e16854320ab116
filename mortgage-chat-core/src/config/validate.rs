//! Configuration validation rules.

use super::schema::Config;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    let base_url = config.service.base_url.trim();
    if base_url.is_empty() {
        errors.push("service.base_url must not be empty".to_string());
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push("service.base_url must start with http:// or https://".to_string());
    }
    if !config.service.chat_path.starts_with('/') {
        errors.push("service.chat_path must start with '/'".to_string());
    }

    if config.chat.fallback_message.trim().is_empty() {
        errors.push("chat.fallback_message must not be empty".to_string());
    }

    let format = config.logging.format.to_ascii_lowercase();
    if format != "text" && format != "json" {
        errors.push("logging.format must be 'text' or 'json'".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_defaults() {
        validate_config(&Config::default()).unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = Config::default();
        config.service.base_url = "localhost:5000".to_string();

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("service.base_url"));
    }

    #[test]
    fn test_validate_aggregates_errors() {
        let mut config = Config::default();
        config.service.chat_path = "chat".to_string();
        config.chat.fallback_message = "  ".to_string();
        config.logging.format = "yaml".to_string();

        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("service.chat_path"));
        assert!(err.contains("chat.fallback_message"));
        assert!(err.contains("logging.format"));
    }
}
