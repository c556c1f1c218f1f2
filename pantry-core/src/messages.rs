//! User-facing error texts.
//!
//! Error control flow never depends on these strings; callers swap the table
//! to localize what the UI shows. Tables load from JSON with missing keys
//! falling back to English.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the failing field path in `invalid_structure`.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Localized message table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorMessages {
    pub api_key_required: String,
    pub network_error: String,
    pub timeout: String,
    pub fetch_failed: String,
    pub empty_response: String,
    pub invalid_json: String,
    /// May contain `{path}`.
    pub invalid_structure: String,
    pub not_configured: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self::english()
    }
}

impl ErrorMessages {
    pub fn english() -> Self {
        Self {
            api_key_required: "API key required. Please add your API key in the settings."
                .to_string(),
            network_error: "Network error. Please check your internet connection.".to_string(),
            timeout: "The request took too long and was cancelled. Please try again.".to_string(),
            fetch_failed: "Failed to fetch recipes from the AI service.".to_string(),
            empty_response: "The AI returned an empty response. Please try again.".to_string(),
            invalid_json: "Failed to parse the AI response as JSON. Please try again.".to_string(),
            invalid_structure:
                "The AI response has a missing or invalid field ({path}). Please try again."
                    .to_string(),
            not_configured: "The AI service is not configured.".to_string(),
        }
    }

    pub fn german() -> Self {
        Self {
            api_key_required:
                "API-Schlüssel erforderlich. Bitte trage deinen API-Schlüssel in den Einstellungen ein."
                    .to_string(),
            network_error: "Netzwerkfehler. Bitte überprüfe deine Internetverbindung.".to_string(),
            timeout: "Die Anfrage hat zu lange gedauert und wurde abgebrochen. Bitte versuche es erneut."
                .to_string(),
            fetch_failed: "Rezepte konnten nicht vom KI-Dienst abgerufen werden.".to_string(),
            empty_response: "Die KI hat eine leere Antwort geliefert. Bitte versuche es erneut."
                .to_string(),
            invalid_json:
                "Die Antwort der KI konnte nicht als JSON gelesen werden. Bitte versuche es erneut."
                    .to_string(),
            invalid_structure:
                "Die Antwort der KI enthält ein fehlendes oder ungültiges Feld ({path}). Bitte versuche es erneut."
                    .to_string(),
            not_configured: "Der KI-Dienst ist nicht konfiguriert.".to_string(),
        }
    }

    /// Built-in table for a language name or code; English when unknown.
    pub fn for_language(language: &str) -> Self {
        match language.trim().to_lowercase().as_str() {
            "de" | "german" | "deutsch" => Self::german(),
            _ => Self::english(),
        }
    }

    /// `invalid_structure` with the field path filled in.
    pub fn invalid_structure_at(&self, path: &str) -> String {
        self.invalid_structure.replace(PATH_PLACEHOLDER, path)
    }
}
