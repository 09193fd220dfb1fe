//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default Gemini REST endpoint root
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default completion model
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Root configuration for neuronest
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote completion endpoint
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Terminal interface settings
    #[serde(default)]
    pub ui: UiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote completion endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key appended as the `key` query parameter. May be empty.
    #[serde(default)]
    pub api_key: String,
    /// Endpoint root, without the `/models/...` suffix
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Model name used in `models/{model}:generateContent`
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_api_base(),
            model: default_model(),
        }
    }
}

impl ProviderConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Terminal interface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Name used in the greeting on an empty conversation
    #[serde(default = "default_user_name")]
    pub user_name: String,
}

fn default_user_name() -> String {
    "Sam".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            user_name: default_user_name(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "~/.neuronest/logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            overrides: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"provider":{"api_key":"abc"}}"#).unwrap();
        assert_eq!(config.provider.api_key, "abc");
        assert_eq!(config.provider.api_base, DEFAULT_API_BASE);
        assert_eq!(config.provider.model, DEFAULT_MODEL);
        assert_eq!(config.ui.user_name, "Sam");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_has_api_key() {
        let mut provider = ProviderConfig::default();
        assert!(!provider.has_api_key());
        provider.api_key = "   ".to_string();
        assert!(!provider.has_api_key());
        provider.api_key = "key".to_string();
        assert!(provider.has_api_key());
    }
}
