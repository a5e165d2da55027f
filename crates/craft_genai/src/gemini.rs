//! REST client for the Gemini generation API.

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backend::{ChunkSink, GenerationBackend};
use crate::config::GenAiSettings;
use crate::error::{GenAiError, GenAiResult};
use crate::types::{
    Content, GeneratedImage, GenerationRequest, GenerationResponse, GroundingSource,
    ImageRequest, Modality, Part, Role, Usage,
};

/// HTTP client for the generation API.
pub struct GeminiClient {
    settings: GenAiSettings,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(settings: GenAiSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from environment variables.
    pub fn from_env() -> GenAiResult<Self> {
        Ok(Self::new(GenAiSettings::from_env()?))
    }

    pub fn settings(&self) -> &GenAiSettings {
        &self.settings
    }

    /// Text calls honor the model override; image-output calls keep their model.
    fn model_for<'a>(&'a self, request: &'a GenerationRequest) -> &'a str {
        if request.wants_image() {
            &request.model
        } else {
            self.settings.resolve_model(&request.model)
        }
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.settings.base_url, model, method
        )
    }

    async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> GenAiResult<reqwest::Response> {
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.settings.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| GenAiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> GenAiResult<GenerationResponse> {
        let url = self.endpoint(self.model_for(request), "generateContent");
        let body = WireRequest::from(request);
        let wire: WireResponse = self
            .post(&url, &body)
            .await?
            .json()
            .await
            .map_err(|e| GenAiError::InvalidResponse(e.to_string()))?;

        let response = wire.into_response()?;
        info!(
            "Generation finished: {} input / {} output tokens",
            response.usage.input_tokens, response.usage.output_tokens
        );
        Ok(response)
    }

    async fn generate_stream(
        &self,
        request: &GenerationRequest,
        on_chunk: ChunkSink<'_>,
    ) -> GenAiResult<()> {
        let url = format!("{}?alt=sse", self.endpoint(self.model_for(request), "streamGenerateContent"));
        let body = WireRequest::from(request);
        let response = self.post(&url, &body).await?;

        let mut stream = response.bytes_stream();
        let mut buffer = SseBuffer::default();
        let mut chunks = 0usize;
        while let Some(bytes) = stream.next().await {
            let bytes = bytes.map_err(|e| GenAiError::Network(e.to_string()))?;
            for payload in buffer.push(&bytes) {
                chunks += emit_chunk(&payload, on_chunk)?;
            }
        }
        for payload in buffer.finish() {
            chunks += emit_chunk(&payload, on_chunk)?;
        }
        debug!("Stream closed after {} chunks", chunks);
        Ok(())
    }

    async fn generate_image(&self, request: &ImageRequest) -> GenAiResult<GeneratedImage> {
        // Image models are never replaced by the text model override.
        let url = self.endpoint(&request.model, "predict");
        let body = WireImageRequest::from(request);
        let wire: WireImageResponse = self
            .post(&url, &body)
            .await?
            .json()
            .await
            .map_err(|e| GenAiError::InvalidResponse(e.to_string()))?;

        wire.predictions
            .into_iter()
            .next()
            .map(|p| GeneratedImage {
                mime_type: p.mime_type.unwrap_or_else(|| "image/jpeg".to_string()),
                data: p.bytes_base64_encoded,
            })
            .ok_or(GenAiError::EmptyResponse)
    }
}

fn emit_chunk(payload: &str, on_chunk: ChunkSink<'_>) -> GenAiResult<usize> {
    let wire: WireResponse = serde_json::from_str(payload)
        .map_err(|e| GenAiError::InvalidResponse(format!("bad stream chunk: {}", e)))?;
    wire.check_error()?;
    let text = wire.first_text();
    if text.is_empty() {
        return Ok(0);
    }
    on_chunk(&text);
    Ok(1)
}

/// Splits a server-sent event byte stream into `data:` payloads.
#[derive(Debug, Default)]
pub struct SseBuffer {
    pending: Vec<u8>,
}

impl SseBuffer {
    /// Feed raw bytes; returns every payload whose line is now complete.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);
        let mut payloads = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            if let Some(payload) = Self::payload(&line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Flush a trailing line that was not newline-terminated.
    pub fn finish(&mut self) -> Vec<String> {
        let line = std::mem::take(&mut self.pending);
        Self::payload(&line).into_iter().collect()
    }

    fn payload(line: &[u8]) -> Option<String> {
        let line = String::from_utf8_lossy(line);
        let line = line.trim_end_matches(['\n', '\r']);
        let data = line.strip_prefix("data:")?.trim_start();
        if data.is_empty() || data == "[DONE]" {
            return None;
        }
        Some(data.to_string())
    }
}

// Wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<WireBlob>,
    #[serde(default, skip_serializing)]
    thought: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBlob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<Modality>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<WireThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireThinkingConfig {
    thinking_budget: u32,
}

impl From<&Part> for WirePart {
    fn from(part: &Part) -> Self {
        match part {
            Part::Text(text) => Self {
                text: Some(text.clone()),
                ..Self::default()
            },
            Part::InlineData { mime_type, data } => Self {
                inline_data: Some(WireBlob {
                    mime_type: mime_type.clone(),
                    data: data.clone(),
                }),
                ..Self::default()
            },
        }
    }
}

impl From<&Content> for WireContent {
    fn from(content: &Content) -> Self {
        let role = match content.role {
            Role::User => "user",
            Role::Model => "model",
        };
        Self {
            role: Some(role.to_string()),
            parts: content.parts.iter().map(WirePart::from).collect(),
        }
    }
}

impl From<&GenerationRequest> for WireRequest {
    fn from(request: &GenerationRequest) -> Self {
        let config = &request.config;
        let generation_config = if config.response_mime_type.is_some()
            || config.response_schema.is_some()
            || config.response_modalities.is_some()
            || config.thinking_budget.is_some()
        {
            Some(WireGenerationConfig {
                response_mime_type: config.response_mime_type.clone(),
                response_schema: config.response_schema.clone(),
                response_modalities: config.response_modalities.clone(),
                thinking_config: config
                    .thinking_budget
                    .map(|thinking_budget| WireThinkingConfig { thinking_budget }),
            })
        } else {
            None
        };

        let tools = if config.google_search {
            vec![serde_json::json!({ "googleSearch": {} })]
        } else {
            Vec::new()
        };

        Self {
            contents: request.contents.iter().map(WireContent::from).collect(),
            system_instruction: request.system_instruction.as_ref().map(|text| WireContent {
                role: None,
                parts: vec![WirePart::from(&Part::Text(text.clone()))],
            }),
            generation_config,
            tools,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    usage_metadata: Option<WireUsage>,
    /// Set when the server reports a failure inside a 200 response or stream
    error: Option<WireError>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
    status: Option<String>,
}

impl From<&WireError> for GenAiError {
    fn from(err: &WireError) -> Self {
        let body = match &err.status {
            Some(status) if !status.is_empty() => format!("{} ({})", err.message, status),
            _ => err.message.clone(),
        };
        Self::Http {
            status: err.code,
            body,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    content: Option<WireContent>,
    grounding_metadata: Option<WireGroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct WireGroundingChunk {
    web: Option<WireWebSource>,
}

#[derive(Debug, Deserialize)]
struct WireWebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUsage {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

impl WireResponse {
    fn parts(&self) -> impl Iterator<Item = &WirePart> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|c| c.parts.iter())
            .filter(|p| !p.thought.unwrap_or(false))
    }

    fn first_text(&self) -> String {
        self.parts().filter_map(|p| p.text.as_deref()).collect()
    }

    fn check_error(&self) -> GenAiResult<()> {
        match &self.error {
            Some(err) => Err(GenAiError::from(err)),
            None => Ok(()),
        }
    }

    fn into_response(self) -> GenAiResult<GenerationResponse> {
        self.check_error()?;
        if self.candidates.is_empty() {
            return Err(GenAiError::EmptyResponse);
        }

        let text = self.first_text();
        let images: Vec<GeneratedImage> = self
            .parts()
            .filter_map(|p| p.inline_data.as_ref())
            .map(|blob| GeneratedImage {
                mime_type: blob.mime_type.clone(),
                data: blob.data.clone(),
            })
            .collect();

        if text.is_empty() && images.is_empty() {
            return Err(GenAiError::EmptyResponse);
        }

        let sources = self
            .candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| match (&web.uri, &web.title) {
                        (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => {
                            Some(GroundingSource {
                                uri: uri.clone(),
                                title: title.clone(),
                            })
                        }
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let usage = self
            .usage_metadata
            .map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(GenerationResponse {
            text,
            images,
            sources,
            usage,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireImageRequest {
    instances: Vec<WireImageInstance>,
    parameters: WireImageParameters,
}

#[derive(Debug, Serialize)]
struct WireImageInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireImageParameters {
    sample_count: u32,
    aspect_ratio: String,
    output_mime_type: String,
}

impl From<&ImageRequest> for WireImageRequest {
    fn from(request: &ImageRequest) -> Self {
        Self {
            instances: vec![WireImageInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: WireImageParameters {
                sample_count: 1,
                aspect_ratio: request.aspect_ratio.as_str().to_string(),
                output_mime_type: "image/jpeg".to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireImageResponse {
    #[serde(default)]
    predictions: Vec<WirePrediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePrediction {
    bytes_base64_encoded: String,
    mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AspectRatio, GenerationConfig, FLASH_IMAGE_MODEL, PRO_MODEL};
    use serde_json::json;

    #[test]
    fn test_endpoint_uses_model_override() {
        let client = GeminiClient::new(GenAiSettings::new("k").model_override("custom"));
        assert_eq!(
            client.endpoint(client.settings().resolve_model(PRO_MODEL), "generateContent"),
            "https://generativelanguage.googleapis.com/v1beta/models/custom:generateContent"
        );
        assert_eq!(
            client.endpoint("imagen-4.0-generate-001", "predict"),
            "https://generativelanguage.googleapis.com/v1beta/models/imagen-4.0-generate-001:predict"
        );
    }

    #[test]
    fn test_image_output_keeps_its_model() {
        let client = GeminiClient::new(GenAiSettings::new("k").model_override("custom"));
        let edit = GenerationRequest::new(FLASH_IMAGE_MODEL, "make it blue")
            .config(GenerationConfig::default().with_modalities(vec![Modality::Image]));
        assert_eq!(client.model_for(&edit), FLASH_IMAGE_MODEL);

        let describe = GenerationRequest::new(FLASH_IMAGE_MODEL, "what is this?");
        assert_eq!(client.model_for(&describe), "custom");
    }

    #[test]
    fn test_structured_request_body() {
        let request = GenerationRequest::new(PRO_MODEL, "a login screen")
            .system_instruction("be a wireframer")
            .config(GenerationConfig::structured(json!({"type": "OBJECT"})));

        let body = serde_json::to_value(WireRequest::from(&request)).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "a login screen");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be a wireframer");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_plain_request_has_no_generation_config() {
        let request = GenerationRequest::new(PRO_MODEL, "hi");
        let body = serde_json::to_value(WireRequest::from(&request)).unwrap();
        assert!(body.get("generationConfig").is_none());
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_inline_data_and_search_tool() {
        let request = GenerationRequest::with_contents(
            PRO_MODEL,
            vec![Content::user(vec![Part::inline("image/png", "AAAA"), Part::text("describe")])],
        )
        .config(
            GenerationConfig::default()
                .with_google_search()
                .with_modalities(vec![Modality::Image])
                .with_thinking_budget(32768),
        );

        let body = serde_json::to_value(WireRequest::from(&request)).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(body["tools"][0], json!({"googleSearch": {}}));
        assert_eq!(body["generationConfig"]["responseModalities"][0], "IMAGE");
        assert_eq!(body["generationConfig"]["thinkingConfig"]["thinkingBudget"], 32768);
    }

    #[test]
    fn test_response_extraction() {
        let wire: WireResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "Hello "},
                    {"text": "world"}
                ]},
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://a.example", "title": "A"}},
                    {"web": {"uri": "https://b.example"}},
                    {}
                ]}
            }],
            "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 5}
        }))
        .unwrap();

        let response = wire.into_response().unwrap();
        assert_eq!(response.text, "Hello world");
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].title, "A");
        assert_eq!(response.usage.output_tokens, 5);
    }

    #[test]
    fn test_empty_candidates_is_error() {
        let wire: WireResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(matches!(wire.into_response(), Err(GenAiError::EmptyResponse)));
    }

    #[test]
    fn test_inline_image_response() {
        let wire: WireResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "iVBOR"}}
            ]}}]
        }))
        .unwrap();
        let response = wire.into_response().unwrap();
        assert!(response.text.is_empty());
        assert_eq!(response.images[0].data_url(), "data:image/png;base64,iVBOR");
    }

    #[test]
    fn test_image_request_body() {
        let request = ImageRequest::new("a cat").aspect_ratio(AspectRatio::Landscape);
        let body = serde_json::to_value(WireImageRequest::from(&request)).unwrap();
        assert_eq!(body["instances"][0]["prompt"], "a cat");
        assert_eq!(body["parameters"]["aspectRatio"], "16:9");
        assert_eq!(body["parameters"]["sampleCount"], 1);
    }

    #[test]
    fn test_sse_buffer_handles_split_lines() {
        let mut buffer = SseBuffer::default();
        assert!(buffer.push(b"data: {\"a\":").is_empty());
        let payloads = buffer.push(b"1}\r\n\r\n: keep-alive\ndata: {\"b\":2}\n");
        assert_eq!(payloads, vec!["{\"a\":1}".to_string(), "{\"b\":2}".to_string()]);

        assert!(buffer.push(b"data: [DONE]\n").is_empty());
        buffer.push(b"data: tail");
        assert_eq!(buffer.finish(), vec!["tail".to_string()]);
    }

    #[test]
    fn test_emit_chunk_skips_empty_text() {
        let mut seen = Vec::new();
        let mut sink = |chunk: &str| seen.push(chunk.to_string());
        let count = emit_chunk(r#"{"candidates":[{"content":{"parts":[{"text":"Hi"}]}}]}"#, &mut sink).unwrap();
        assert_eq!(count, 1);
        let count = emit_chunk(r#"{"candidates":[{"content":{"parts":[]}}]}"#, &mut sink).unwrap();
        assert_eq!(count, 0);
        assert!(emit_chunk("not json", &mut sink).is_err());
        assert_eq!(seen, vec!["Hi"]);
    }

    #[test]
    fn test_error_inside_stream_is_surfaced() {
        let mut seen = Vec::new();
        let mut sink = |chunk: &str| seen.push(chunk.to_string());
        let err = emit_chunk(
            r#"{"error":{"code":500,"message":"Internal error encountered.","status":"INTERNAL"}}"#,
            &mut sink,
        )
        .unwrap_err();
        assert!(matches!(err, GenAiError::Http { status: 500, .. }));
        assert_eq!(
            err.to_string(),
            "Generation API error 500: Internal error encountered. (INTERNAL)"
        );
        assert!(seen.is_empty());
    }

    #[test]
    fn test_error_body_is_not_an_empty_response() {
        let wire: WireResponse =
            serde_json::from_value(json!({"error": {"code": 429, "message": "Quota exceeded"}}))
                .unwrap();
        let err = wire.into_response().unwrap_err();
        assert_eq!(err.to_string(), "Generation API error 429: Quota exceeded");
    }
}
