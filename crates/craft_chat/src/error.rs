//! Error types for chat and UX Genius.

use thiserror::Error;

use craft_genai::GenAiError;

/// Result type alias for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Chat errors
#[derive(Error, Debug)]
pub enum ChatError {
    /// Missing or unusable user input; nothing was sent
    #[error("{0}")]
    Input(String),

    /// A reply is still being streamed into the transcript
    #[error("A reply is still in progress")]
    Busy,

    /// A chunk arrived while no bot turn was open
    #[error("No reply is in progress")]
    NoOpenTurn,

    /// The generation call failed
    #[error("{0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<GenAiError> for ChatError {
    fn from(err: GenAiError) -> Self {
        Self::Generation(err.to_string())
    }
}

impl ChatError {
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}
