//! Base trait for completion providers

use async_trait::async_trait;
use neuronest_core::Turn;
use thiserror::Error;

/// Error type for provider operations
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The body parsed but did not carry the expected candidate structure
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProviderError {
    /// Whether the transport worked but the payload shape was unexpected
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, ProviderError::InvalidResponse(_))
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Trait for completion providers
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the full ordered conversation and return the first candidate's text
    async fn generate(&self, turns: &[Turn]) -> ProviderResult<String>;

    /// Model the provider talks to
    fn model(&self) -> &str;
}
