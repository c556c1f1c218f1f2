//! Loading CLI inputs from disk or stdin.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pantry_core::{ErrorMessages, RecipePromptParams};
use tokio::io::AsyncReadExt;

/// Load generation parameters (camelCase JSON, as the web app stores them).
pub fn load_params(path: &Path) -> Result<RecipePromptParams> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read params file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse params file: {}", path.display()))
}

/// Load a message table from `path`, or the built-in table for `language`
/// when no file is given.
pub fn load_messages(path: Option<&Path>, language: &str) -> Result<ErrorMessages> {
    let Some(path) = path else {
        return Ok(ErrorMessages::for_language(language));
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read messages file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse messages file: {}", path.display()))
}

/// Read a pasted model response from a file, or stdin when `path` is None.
pub async fn read_raw_response(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}
