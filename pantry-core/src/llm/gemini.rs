//! Google Gemini LLM provider.

use super::{GeminiConfig, LlmError, LlmProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Gemini `generateContent` provider.
#[derive(Debug)]
pub struct GeminiProvider {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new GeminiProvider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::NotConfigured(format!("HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    async fn send(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "Gemini API error");
            // Try to parse error response
            let message = serde_json::from_str::<GeminiErrorResponse>(&body)
                .ok()
                .map(|r| r.error.message)
                .filter(|m| !m.trim().is_empty());
            return Err(LlmError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, body = %body, "Unreadable Gemini response envelope");
            LlmError::EmptyResponse
        })?;

        // candidates[0].content.parts[0].text
        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        Ok(text)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout {
                after: self.config.timeout,
            }
        } else {
            LlmError::Network(e.to_string())
        }
    }
}

/// Gemini API request format.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

/// Gemini API response format. Every level may be missing.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

/// Error response from Gemini API.
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiApiError,
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        if self.config.api_key.trim().is_empty() {
            return Err(LlmError::ApiKeyRequired);
        }

        tracing::debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "Calling Gemini API"
        );

        match tokio::time::timeout(self.config.timeout, self.send(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?self.config.timeout, "Gemini request timed out");
                Err(LlmError::Timeout {
                    after: self.config.timeout,
                })
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
