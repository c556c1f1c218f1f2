use thiserror::Error;

use crate::llm::LlmError;
use crate::messages::ErrorMessages;
use crate::validate::ValidationError;

/// Why a single generation attempt failed.
///
/// `Display` carries developer-facing detail; [`PlanError::user_message`]
/// renders the short localized text meant for the UI.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Error kinds, independent of message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ApiKeyRequired,
    Network,
    Timeout,
    Http,
    EmptyResponse,
    JsonSyntax,
    StructuralValidation,
    NotConfigured,
}

impl PlanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanError::Llm(LlmError::ApiKeyRequired) => ErrorKind::ApiKeyRequired,
            PlanError::Llm(LlmError::Network(_)) => ErrorKind::Network,
            PlanError::Llm(LlmError::Timeout { .. }) => ErrorKind::Timeout,
            PlanError::Llm(LlmError::Http { .. }) => ErrorKind::Http,
            PlanError::Llm(LlmError::EmptyResponse) => ErrorKind::EmptyResponse,
            PlanError::Llm(LlmError::NotConfigured(_)) => ErrorKind::NotConfigured,
            PlanError::Validation(ValidationError::JsonSyntax(_)) => ErrorKind::JsonSyntax,
            PlanError::Validation(ValidationError::Structure { .. }) => {
                ErrorKind::StructuralValidation
            }
        }
    }

    /// Short, localized message for display. HTTP errors show the provider's
    /// own message when it sent one.
    pub fn user_message(&self, messages: &ErrorMessages) -> String {
        match self {
            PlanError::Llm(LlmError::ApiKeyRequired) => messages.api_key_required.clone(),
            PlanError::Llm(LlmError::Network(_)) => messages.network_error.clone(),
            PlanError::Llm(LlmError::Timeout { .. }) => messages.timeout.clone(),
            PlanError::Llm(LlmError::Http { message, .. }) => message
                .clone()
                .unwrap_or_else(|| messages.fetch_failed.clone()),
            PlanError::Llm(LlmError::EmptyResponse) => messages.empty_response.clone(),
            PlanError::Llm(LlmError::NotConfigured(_)) => messages.not_configured.clone(),
            PlanError::Validation(ValidationError::JsonSyntax(_)) => messages.invalid_json.clone(),
            PlanError::Validation(ValidationError::Structure { path, .. }) => {
                messages.invalid_structure_at(path)
            }
        }
    }
}
