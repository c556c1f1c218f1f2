//! LLM provider abstraction for meal-plan generation.
//!
//! This module provides a trait-based abstraction over the model backend with
//! a Gemini implementation and a fake provider for testing.

mod config;
mod fake;
mod gemini;

pub use config::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
pub use fake::{FakeProvider, SAMPLE_MEAL_PLAN_RESPONSE};
pub use gemini::GeminiProvider;

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key required")]
    ApiKeyRequired,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("API returned error: {status} - {}", .message.as_deref().unwrap_or("fetch failed"))]
    Http {
        status: u16,
        /// Structured message from the error body, if there was one.
        message: Option<String>,
    },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for LLM providers.
///
/// Implementations should be stateless and thread-safe. The provider is
/// responsible for making API calls and returning the model's text response.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt to the LLM and get a text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get the provider name (e.g., "gemini", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "gemini-2.0-flash").
    fn model_name(&self) -> &str;
}

/// Create a provider from environment variables.
///
/// - `PANTRY_AI_PROVIDER`: "gemini" (default) | "fake"
/// - see [`GeminiConfig::from_env`] for the Gemini settings
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, LlmError> {
    let provider = std::env::var("PANTRY_AI_PROVIDER").unwrap_or_else(|_| "gemini".to_string());
    create_provider(&provider, GeminiConfig::from_env())
}

/// Create a provider by name. `config` is only used by "gemini".
pub fn create_provider(
    provider: &str,
    config: GeminiConfig,
) -> Result<Box<dyn LlmProvider>, LlmError> {
    match provider.trim().to_lowercase().as_str() {
        "gemini" => {
            let provider = GeminiProvider::new(config)?;
            Ok(Box::new(provider))
        }
        "fake" => Ok(Box::new(FakeProvider::with_sample_meal_plan())),
        other => Err(LlmError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}
