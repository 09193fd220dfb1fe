//! Gemini `generateContent` HTTP client

use async_trait::async_trait;
use neuronest_core::config::ProviderConfig;
use neuronest_core::utils::truncate;
use neuronest_core::{Role, Turn};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::base::{ChatProvider, ProviderError, ProviderResult};

/// Longest body excerpt carried into an error message
const BODY_EXCERPT_LEN: usize = 200;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: Role,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_turns(turns: &'a [Turn]) -> Self {
        Self {
            contents: turns
                .iter()
                .map(|turn| RequestContent {
                    role: turn.role(),
                    parts: [RequestPart { text: turn.text() }],
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini REST client
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// `api_base` is the endpoint root such as
    /// `https://generativelanguage.googleapis.com/v1beta`.
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let api_base: String = api_base.into();
        Self {
            client: Client::builder().build().unwrap_or_else(|_| Client::new()),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Build a client from the `provider` config section
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(&config.api_key, &config.api_base, &config.model)
    }

    /// Endpoint without the key, safe to log
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    fn request_url(&self) -> ProviderResult<Url> {
        let mut url = Url::parse(&self.endpoint()).map_err(|e| {
            ProviderError::ConfigError(format!("invalid endpoint {}: {}", self.endpoint(), e))
        })?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a parsed body
fn extract_candidate_text(body: Value, status: StatusCode) -> ProviderResult<String> {
    let api_error = body
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let excerpt = truncate(&body.to_string(), BODY_EXCERPT_LEN);

    let describe = |reason: &str| {
        let detail = api_error.clone().unwrap_or_else(|| excerpt.clone());
        if status.is_success() {
            format!("{}: {}", reason, detail)
        } else {
            format!("{} (HTTP {}): {}", reason, status, detail)
        }
    };

    let parsed: GenerateContentResponse = serde_json::from_value(body)
        .map_err(|e| ProviderError::InvalidResponse(describe(&format!("unexpected shape, {}", e))))?;

    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| ProviderError::InvalidResponse(describe("no candidate text")))
}

#[async_trait]
impl ChatProvider for GeminiClient {
    async fn generate(&self, turns: &[Turn]) -> ProviderResult<String> {
        let url = self.request_url()?;
        let request = GenerateContentRequest::from_turns(turns);

        debug!(
            "Sending {} turns to {}",
            request.contents.len(),
            self.endpoint()
        );

        let response = self.client.post(url).json(&request).send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;

        debug!("Received HTTP {} from {}", status, self.endpoint());
        extract_candidate_text(body, status)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
