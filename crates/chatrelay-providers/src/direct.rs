//! Direct provider — a one-shot client for OpenAI-compatible APIs.
//!
//! Each `generate` call issues exactly one `POST /chat/completions` request
//! with explicit temperature and max-token parameters and returns the first
//! text segment of the response. No retries, no caching, no streaming.

use async_trait::async_trait;
use tracing::{debug, error};

use chatrelay_core::config::ProviderSettings;
use chatrelay_core::error::ProviderError;
use chatrelay_core::types::{ChatCompletionRequest, ChatCompletionResponse, Message};

use crate::traits::{ChatProvider, GenerationParams};

/// Fallback API base when neither config nor env provide one.
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

// ─────────────────────────────────────────────
// DirectProvider
// ─────────────────────────────────────────────

/// A provider that talks to an OpenAI-compatible HTTP API, one request per
/// call. Holds a pooled `reqwest::Client` plus immutable configuration.
pub struct DirectProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Remote model this instance targets.
    model: String,
}

impl std::fmt::Debug for DirectProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl DirectProvider {
    /// Create a new provider from settings.
    ///
    /// `timeout_seconds` is a passthrough: when absent the HTTP client's own
    /// default timeout behavior applies.
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let api_base = settings
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Configuration(format!("HTTP client: {e}")))?;

        Ok(DirectProvider {
            client,
            api_base,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    /// Issue one chat completion request and return the raw response.
    ///
    /// Upstream statuses ≥ 500 map to [`ProviderError::UpstreamOverload`];
    /// everything else (4xx, network, decode) maps to
    /// [`ProviderError::Remote`]. Detail strings embed an identifiable
    /// substring of the original failure.
    pub(crate) async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            max_tokens: params.max_tokens,
            temperature: Some(params.temperature),
        };

        let url = self.completions_url();

        debug!(
            model = %self.model,
            messages = messages.len(),
            temperature = params.temperature,
            "calling upstream model"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                ProviderError::Remote(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            error!(status = %status, body = %error_text, "upstream API error");

            let detail = format!("{status} — {error_text}");
            return if status.is_server_error() {
                Err(ProviderError::UpstreamOverload(detail))
            } else {
                Err(ProviderError::Remote(detail))
            };
        }

        response.json::<ChatCompletionResponse>().await.map_err(|e| {
            error!(error = %e, "failed to parse upstream response");
            ProviderError::Remote(format!("failed to parse response: {e}"))
        })
    }
}

#[async_trait]
impl ChatProvider for DirectProvider {
    async fn generate(
        &self,
        message: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let messages = vec![Message::user(message)];
        let response = self.complete(&messages, params).await?;

        response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::Remote("upstream response contained no text".into()))
    }

    fn tag(&self) -> &str {
        "direct"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
