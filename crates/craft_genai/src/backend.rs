//! Generation backend trait.

use async_trait::async_trait;

use crate::error::GenAiResult;
use crate::types::{GeneratedImage, GenerationRequest, GenerationResponse, ImageRequest};

/// Callback receiving streamed text chunks in arrival order.
pub type ChunkSink<'a> = &'a mut (dyn FnMut(&str) + Send);

/// The external generation collaborator.
///
/// Every call issues exactly one outbound request. Implementations never
/// retry; callers decide whether to resubmit.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// One-shot text or structured generation.
    async fn generate(&self, request: &GenerationRequest) -> GenAiResult<GenerationResponse>;

    /// Streaming generation. `on_chunk` is called once per non-empty text
    /// chunk, strictly in the order the chunks arrive.
    async fn generate_stream(
        &self,
        request: &GenerationRequest,
        on_chunk: ChunkSink<'_>,
    ) -> GenAiResult<()>;

    /// Synthesise an image from a prompt.
    async fn generate_image(&self, request: &ImageRequest) -> GenAiResult<GeneratedImage>;
}
