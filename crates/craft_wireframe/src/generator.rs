//! Layout generator client.
//!
//! Turns a natural-language prompt into a [`Layout`] with one structured
//! generation call.

use craft_genai::{GenerationBackend, GenerationConfig, GenerationRequest, PRO_MODEL};
use tracing::{debug, info, warn};

use crate::error::{WireframeError, WireframeResult};
use crate::models::Layout;
use crate::schema::response_schema;
use crate::validator::{decode_layout, LayoutValidator};

pub const EMPTY_PROMPT_ERROR: &str = "Please enter a prompt to generate a wireframe.";

/// Instruction sent with every wireframe request.
pub const WIREFRAME_SYSTEM_INSTRUCTION: &str = "You are an AI wireframing assistant. Based on the user's prompt, generate a JSON object describing a basic screen layout. The JSON must strictly follow the provided schema. Use common UI components and sensible defaults. Focus on structure and content, not just styling. Pay attention to details like theme, spacing, colors, and alignment to create a visually representative wireframe. For complex layouts, use the 'absolute' layout and provide a 'position' object (top, left, width, height as percentages) for each component. You can also provide an optional 'style' object for additional CSS properties like borderRadius.";

/// Sends prompts to a generation backend and decodes the replies.
pub struct LayoutGenerator<B> {
    backend: B,
    model: String,
}

impl<B: GenerationBackend> LayoutGenerator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            model: PRO_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The request that `prompt` turns into. The prompt is sent verbatim.
    pub fn request(&self, prompt: &str) -> GenerationRequest {
        GenerationRequest::new(&self.model, prompt)
            .system_instruction(WIREFRAME_SYSTEM_INSTRUCTION)
            .config(GenerationConfig::structured(response_schema()))
    }

    /// Generate a layout for `prompt`.
    ///
    /// A blank prompt fails with [`WireframeError::Input`] before anything is
    /// sent. Otherwise exactly one request goes out; there are no retries.
    pub async fn generate_layout(&self, prompt: &str) -> WireframeResult<Layout> {
        if prompt.trim().is_empty() {
            return Err(WireframeError::Input(EMPTY_PROMPT_ERROR.to_string()));
        }

        info!("Generating wireframe with {}", self.model);
        let response = self.backend.generate(&self.request(prompt)).await?;
        debug!("Structured reply is {} bytes", response.text.len());

        let layout = decode_layout(&response.text)?;
        for warning in LayoutValidator::check(&layout).warnings {
            warn!("{}", warning);
        }

        info!(
            "Generated '{}' ({}, {} components)",
            layout.screen_title,
            layout.layout,
            layout.len()
        );
        Ok(layout)
    }
}
