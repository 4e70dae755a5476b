//! HTTP adapter for Gemini's `generateContent` endpoint with Google Search
//! grounding.
//!
//! One request per call: no retry, no cache. Transport and provider failures
//! are returned to the caller as-is.

use std::time::Duration;

use gamescout_core::{AppConfig, GroundingReference};
use reqwest::{Client, Url};

use crate::error::ScanError;
use crate::types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_USER_AGENT: &str = "gamescout/0.1 (deal-scanner)";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// What the model said, plus the web pages it grounded the answer on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelResponse {
    pub text: String,
    pub grounding_references: Vec<GroundingReference>,
}

/// Client for Gemini's `generateContent` API.
///
/// Use [`GeminiClient::new`] for production, [`GeminiClient::from_config`]
/// when an [`AppConfig`] is at hand, or [`GeminiClient::with_base_url`] to
/// point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Configuration`] if `api_key` is blank, or
    /// [`ScanError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, ScanError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`GeminiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScanError> {
        Self::build(
            &config.api_key,
            &config.model,
            config.request_timeout_secs,
            &config.api_base_url,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// - [`ScanError::Configuration`] if `api_key` or `model` is blank.
    /// - [`ScanError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`ScanError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ScanError> {
        Self::build(api_key, model, timeout_secs, base_url, DEFAULT_USER_AGENT)
    }

    fn build(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, ScanError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ScanError::Configuration(
                "Gemini API key is empty".to_string(),
            ));
        }
        let model = model.trim();
        if model.is_empty() {
            return Err(ScanError::Configuration(
                "Gemini model name is empty".to_string(),
            ));
        }

        // Exactly one trailing slash so `join` appends rather than replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ScanError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` with Google Search grounding enabled and returns the
    /// first candidate's text and grounding links.
    ///
    /// # Errors
    ///
    /// - [`ScanError::Http`] on network failure or timeout.
    /// - [`ScanError::Api`] if the provider returns a non-2xx status.
    /// - [`ScanError::Deserialize`] if the response envelope is not valid JSON.
    pub async fn generate(&self, prompt: &str) -> Result<ModelResponse, ScanError> {
        let url = self.generate_url()?;
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "calling generateContent");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::grounded(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ScanError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| ScanError::Deserialize {
                context: format!("generateContent({})", self.model),
                source: e,
            })?;

        let text = parsed.text();
        let grounding_references = parsed.grounding_references();
        tracing::debug!(
            text_len = text.len(),
            references = grounding_references.len(),
            "model responded"
        );

        Ok(ModelResponse {
            text,
            grounding_references,
        })
    }

    /// `{base}/models/{model}:generateContent`
    fn generate_url(&self) -> Result<Url, ScanError> {
        let path = format!("models/{}:generateContent", self.model);
        self.base_url
            .join(&path)
            .map_err(|e| ScanError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the
/// raw body (or a placeholder when it is empty).
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty error body".to_string()
            } else {
                trimmed.to_string()
            }
        })
}
