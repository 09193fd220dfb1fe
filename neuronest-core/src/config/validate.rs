//! Configuration validation rules.

use super::schema::Config;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    let api_base = config.provider.api_base.trim();
    if api_base.is_empty() {
        errors.push("provider.api_base must not be empty".to_string());
    } else if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
        errors.push("provider.api_base must start with http:// or https://".to_string());
    }

    let model = &config.provider.model;
    if model.trim().is_empty() {
        errors.push("provider.model must not be empty".to_string());
    } else if model.chars().any(|c| c.is_whitespace() || c == '/') {
        errors.push("provider.model must not contain whitespace or '/'".to_string());
    }

    if !LOG_LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
        errors.push(format!(
            "logging.level must be one of {}",
            LOG_LEVELS.join(", ")
        ));
    }
    if !LOG_FORMATS.contains(&config.logging.format.to_ascii_lowercase().as_str()) {
        errors.push(format!(
            "logging.format must be one of {}",
            LOG_FORMATS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}
