//! Request and response types shared by every backend.

use serde::{Deserialize, Serialize};

/// Default model for long-form and structured generation.
pub const PRO_MODEL: &str = "gemini-2.5-pro";
/// Default model for chat.
pub const FLASH_MODEL: &str = "gemini-2.5-flash";
/// Default model for image generation.
pub const IMAGE_MODEL: &str = "imagen-4.0-generate-001";
/// Model that edits and describes images passed inline.
pub const FLASH_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
/// Low-latency model for short suggestions.
pub const LITE_MODEL: &str = "gemini-flash-lite-latest";

/// Who authored a piece of content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A single part of a content turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    /// Base64-encoded bytes with their mime type.
    InlineData { mime_type: String, data: String },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::InlineData { .. } => None,
        }
    }
}

/// One turn of content sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Role::User,
            parts,
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![Part::text(text)])
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::text(text)],
        }
    }
}

/// Output modality the model should answer with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    Text,
    Image,
}

/// Optional knobs for a generation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationConfig {
    /// e.g. `application/json` for structured output
    pub response_mime_type: Option<String>,
    /// Output-format guidance attached to structured requests
    pub response_schema: Option<serde_json::Value>,
    pub response_modalities: Option<Vec<Modality>>,
    pub thinking_budget: Option<u32>,
    /// Ground the answer with web search
    pub google_search: bool,
}

impl GenerationConfig {
    /// Config for a JSON response constrained by `schema`.
    pub fn structured(schema: serde_json::Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            ..Self::default()
        }
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }

    pub fn with_modalities(mut self, modalities: Vec<Modality>) -> Self {
        self.response_modalities = Some(modalities);
        self
    }

    pub fn with_google_search(mut self) -> Self {
        self.google_search = true;
        self
    }
}

/// A complete request to the generation collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub contents: Vec<Content>,
    pub system_instruction: Option<String>,
    pub config: GenerationConfig,
}

impl GenerationRequest {
    /// Single user turn containing `prompt`.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::with_contents(model, vec![Content::user_text(prompt)])
    }

    pub fn with_contents(model: impl Into<String>, contents: Vec<Content>) -> Self {
        Self {
            model: model.into(),
            contents,
            system_instruction: None,
            config: GenerationConfig::default(),
        }
    }

    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether the caller asked for image output.
    pub fn wants_image(&self) -> bool {
        self.config
            .response_modalities
            .as_ref()
            .map(|m| m.contains(&Modality::Image))
            .unwrap_or(false)
    }

    /// Concatenated text of every user part, used for logging and tests.
    pub fn prompt_text(&self) -> String {
        self.contents
            .iter()
            .filter(|c| c.role == Role::User)
            .flat_map(|c| c.parts.iter().filter_map(Part::as_text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// An image returned inline by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

impl GeneratedImage {
    /// `data:` URL suitable for an `<img src>`.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// A web source the answer was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Response to a non-streaming generation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResponse {
    /// Concatenated text of all text parts of the first candidate
    pub text: String,
    pub images: Vec<GeneratedImage>,
    pub sources: Vec<GroundingSource>,
    pub usage: Usage,
}

impl GenerationResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn from_image(image: GeneratedImage) -> Self {
        Self {
            images: vec![image],
            ..Self::default()
        }
    }
}

/// Aspect ratios accepted by the image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "3:4")]
    StandardPortrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        Self::Square,
        Self::Landscape,
        Self::Portrait,
        Self::Standard,
        Self::StandardPortrait,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Standard => "4:3",
            Self::StandardPortrait => "3:4",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

/// Request for a freshly synthesised image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            model: IMAGE_MODEL.to_string(),
            prompt: prompt.into(),
            aspect_ratio: AspectRatio::default(),
        }
    }

    pub fn aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = ratio;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_text_skips_model_turns_and_images() {
        let request = GenerationRequest::with_contents(
            FLASH_MODEL,
            vec![
                Content::user(vec![Part::inline("image/png", "AAAA"), Part::text("hello")]),
                Content::model_text("hi there"),
                Content::user_text("again"),
            ],
        );
        assert_eq!(request.prompt_text(), "hello\nagain");
    }

    #[test]
    fn test_aspect_ratio_parse() {
        assert_eq!(AspectRatio::parse("16:9"), Some(AspectRatio::Landscape));
        assert_eq!(AspectRatio::parse("2:1"), None);
        assert_eq!(AspectRatio::default().as_str(), "1:1");
    }

    #[test]
    fn test_data_url() {
        let image = GeneratedImage {
            mime_type: "image/jpeg".to_string(),
            data: "Zm9v".to_string(),
        };
        assert_eq!(image.data_url(), "data:image/jpeg;base64,Zm9v");
    }
}
