//! Fake LLM provider for testing.
//!
//! This provider returns deterministic responses based on prompt matching,
//! allowing tests and offline demos to run without network access or API costs.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::sync::RwLock;

/// A meal plan the way models tend to return it: fenced, with an inline
/// footnote, an unescaped quote and a trailing source list.
pub const SAMPLE_MEAL_PLAN_RESPONSE: &str = r#"```json
{
  "recipes": [
    {
      "id": "recipe-1",
      "title": "Chickpea Spinach Curry",
      "time": "35 min",
      "ingredients": [
        {"item": "chickpeas", "amount": "400", "unit": "g"},
        {"item": "spinach", "amount": "200", "unit": "g"},
        {"item": "coconut milk", "amount": "400", "unit": "ml"},
        {"item": "cumin", "amount": "1", "unit": "tsp"}
      ],
      "instructions": [
        "Toast the cumin in a little oil.",
        "Add chickpeas and coconut milk and simmer for 15 minutes." [1](https://example.com/curry),
        "Stir in the spinach until wilted."
      ],
      "usedIngredients": ["p-1", "p-2"],
      "missingIngredients": [
        {"item": "coconut milk", "amount": "400", "unit": "ml"}
      ],
      "nutrition": {"calories": 520, "carbs": 48, "fat": 26, "protein": 19},
      "comments": "Also known as "chana saag" in North India."
    }
  ],
  "shoppingList": [
    {"item": "coconut milk", "amount": "400", "unit": "ml"}
  ]
}
```

Sources
[1] https://example.com/curry
"#;

/// A fake LLM provider for testing.
///
/// Responses are matched by checking if the prompt contains a registered substring.
/// If no match is found, returns a default response or error.
#[derive(Debug, Default)]
pub struct FakeProvider {
    /// Prompt substring -> response, checked in insertion order.
    responses: Vec<(String, String)>,
    /// Default response if no match found.
    default_response: Option<String>,
    /// The most recent prompt seen.
    last_prompt: RwLock<Option<String>>,
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeProvider that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .push((prompt_contains.to_string(), response.to_string()));
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Create a FakeProvider that answers every prompt with [`SAMPLE_MEAL_PLAN_RESPONSE`].
    pub fn with_sample_meal_plan() -> Self {
        Self::new().with_default_response(SAMPLE_MEAL_PLAN_RESPONSE)
    }

    /// The last prompt passed to [`LlmProvider::complete`].
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        *self.last_prompt.write().unwrap_or_else(|e| e.into_inner()) = Some(prompt.to_string());

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in &self.responses {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        // Return default or error
        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::NotConfigured(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
