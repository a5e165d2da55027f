//! Image studio: generate, edit and describe images.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use craft_genai::{
    AspectRatio, Content, GeneratedImage, GenerationBackend, GenerationConfig, GenerationRequest,
    ImageRequest, Modality, Part, FLASH_IMAGE_MODEL,
};
use tracing::info;

use crate::error::{ChatError, ChatResult};
use crate::types::Attachment;

/// File name offered for a generated image.
pub const DEFAULT_IMAGE_FILE: &str = "uxcraft-image.jpg";

pub const NO_IMAGE_RETURNED: &str = "No image was returned from the API.";

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Image requests share one backend.
pub struct ImageStudio<B> {
    backend: B,
}

impl<B: GenerationBackend> ImageStudio<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Generate one JPEG from a text prompt.
    pub async fn generate(&self, prompt: &str, aspect_ratio: AspectRatio) -> ChatResult<GeneratedImage> {
        if blank(prompt) {
            return Err(ChatError::Input(
                "Prompt is required for image generation.".to_string(),
            ));
        }
        info!("Generating image ({})", aspect_ratio.as_str());
        let request = ImageRequest::new(prompt).aspect_ratio(aspect_ratio);
        Ok(self.backend.generate_image(&request).await?)
    }

    /// Apply `prompt` to `image` and return the edited image.
    pub async fn edit(&self, image: Option<&Attachment>, prompt: &str) -> ChatResult<GeneratedImage> {
        let request = image_request(image, prompt)?
            .config(GenerationConfig::default().with_modalities(vec![Modality::Image]));
        info!("Editing image with {}", request.model);
        let response = self.backend.generate(&request).await?;
        response
            .images
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::Generation(NO_IMAGE_RETURNED.to_string()))
    }

    /// Answer `prompt` about `image` in text.
    pub async fn analyze(&self, image: Option<&Attachment>, prompt: &str) -> ChatResult<String> {
        let request = image_request(image, prompt)?;
        info!("Analyzing image with {}", request.model);
        let response = self.backend.generate(&request).await?;
        Ok(response.text)
    }
}

/// Image part first, then the instruction. The image is checked before the prompt.
fn image_request(image: Option<&Attachment>, prompt: &str) -> ChatResult<GenerationRequest> {
    let image = image.ok_or_else(|| {
        ChatError::Input("An image is required for this operation.".to_string())
    })?;
    if blank(prompt) {
        return Err(ChatError::Input(
            "A prompt is required for this operation.".to_string(),
        ));
    }
    let parts = vec![
        Part::inline(&image.mime_type, &image.data),
        Part::text(prompt),
    ];
    Ok(GenerationRequest::with_contents(
        FLASH_IMAGE_MODEL,
        vec![Content::user(parts)],
    ))
}

/// Decode `image` and write it to `path`, creating parent directories.
pub fn save_image(path: &Path, image: &GeneratedImage) -> ChatResult<()> {
    let bytes = BASE64_STANDARD
        .decode(image.data.as_bytes())
        .map_err(|e| ChatError::Generation(format!("Image data is not valid base64: {}", e)))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes)?;
    info!("Wrote {} image bytes to {:?}", bytes.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_genai::{CapturedRequest, GenerationResponse, MockBackend, IMAGE_MODEL};
    use tempfile::tempdir;

    fn cat() -> Attachment {
        Attachment::from_bytes("cat.png", "image/png", b"fake").unwrap()
    }

    fn jpeg(data: &str) -> GeneratedImage {
        GeneratedImage {
            mime_type: "image/jpeg".into(),
            data: data.into(),
        }
    }

    #[tokio::test]
    async fn test_generate_requires_prompt() {
        let backend = MockBackend::new();
        let studio = ImageStudio::new(backend.clone());
        let err = studio.generate("  ", AspectRatio::Square).await.unwrap_err();
        assert_eq!(err.to_string(), "Prompt is required for image generation.");
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_uses_image_model_and_ratio() {
        let backend = MockBackend::new().reply_image(jpeg("AAAA"));
        let studio = ImageStudio::new(backend.clone());

        let image = studio
            .generate("a login screen", AspectRatio::Landscape)
            .await
            .unwrap();
        assert_eq!(image.data, "AAAA");

        match &backend.requests()[0] {
            CapturedRequest::Image(request) => {
                assert_eq!(request.model, IMAGE_MODEL);
                assert_eq!(request.aspect_ratio, AspectRatio::Landscape);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_image_is_checked_before_prompt() {
        let studio = ImageStudio::new(MockBackend::new());
        let err = studio.edit(None, "").await.unwrap_err();
        assert_eq!(err.to_string(), "An image is required for this operation.");

        let err = studio.analyze(Some(&cat()), " ").await.unwrap_err();
        assert_eq!(err.to_string(), "A prompt is required for this operation.");
        assert!(err.is_input());
    }

    #[tokio::test]
    async fn test_edit_asks_for_image_output() {
        let backend = MockBackend::new().reply_image(jpeg("QkJC"));
        let studio = ImageStudio::new(backend.clone());

        let edited = studio.edit(Some(&cat()), "make it blue").await.unwrap();
        assert_eq!(edited.data, "QkJC");

        match &backend.requests()[0] {
            CapturedRequest::Generate(request) => {
                assert_eq!(request.model, FLASH_IMAGE_MODEL);
                assert!(request.wants_image());
                let parts = &request.contents[0].parts;
                assert!(matches!(parts[0], Part::InlineData { .. }));
                assert_eq!(parts[1].as_text(), Some("make it blue"));
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_edit_without_image_in_reply() {
        let backend = MockBackend::new().reply_text("I cannot edit that");
        let studio = ImageStudio::new(backend);
        let err = studio.edit(Some(&cat()), "make it blue").await.unwrap_err();
        assert_eq!(err.to_string(), NO_IMAGE_RETURNED);
    }

    #[tokio::test]
    async fn test_analyze_returns_text() {
        let backend = MockBackend::new()
            .reply_response(GenerationResponse::from_text("A cat on a sofa"));
        let studio = ImageStudio::new(backend.clone());

        let text = studio.analyze(Some(&cat()), "what is this?").await.unwrap();
        assert_eq!(text, "A cat on a sofa");
        match &backend.requests()[0] {
            CapturedRequest::Generate(request) => assert!(!request.wants_image()),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_save_image_decodes_base64() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("out").join(DEFAULT_IMAGE_FILE);
        save_image(&path, &jpeg(&BASE64_STANDARD.encode(b"jpeg bytes"))).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"jpeg bytes");

        assert!(save_image(&path, &jpeg("not base64!")).is_err());
    }
}
