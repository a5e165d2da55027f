//! Error types for the wireframe tool.

use thiserror::Error;

use craft_genai::GenAiError;

/// Result type alias for wireframe operations.
pub type WireframeResult<T> = Result<T, WireframeError>;

/// Errors that can occur while producing or handling a wireframe.
#[derive(Error, Debug)]
pub enum WireframeError {
    /// The user left out something required; raised before any network call.
    #[error("{0}")]
    Input(String),

    /// A generation request is already in flight.
    #[error("A wireframe is already being generated")]
    Busy,

    /// The remote call failed or returned content that is not JSON.
    #[error("Error: {0}")]
    Generation(String),

    /// The JSON parsed but does not match the layout schema.
    #[error("Layout validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<GenAiError> for WireframeError {
    fn from(err: GenAiError) -> Self {
        Self::Generation(err.to_string())
    }
}

impl WireframeError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}
