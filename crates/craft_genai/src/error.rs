//! Error types for the generation adapter.

use thiserror::Error;

/// Result type alias for generation operations.
pub type GenAiResult<T> = Result<T, GenAiError>;

/// Errors that can occur while talking to the generation API.
#[derive(Error, Debug)]
pub enum GenAiError {
    #[error("Generation API not configured. Set GEMINI_API_KEY or API_KEY")]
    NotConfigured,

    #[error("Generation API error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),

    #[error("The model returned an empty response")]
    EmptyResponse,

    #[error("Invalid settings file: {0}")]
    InvalidSettings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for GenAiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Http {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => Self::Network(err.to_string()),
        }
    }
}
