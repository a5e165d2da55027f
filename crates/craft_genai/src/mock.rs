//! Mock generation backend for testing.
//!
//! Returns scripted responses and records every request, so callers can be
//! tested without network access or an API key.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::backend::{ChunkSink, GenerationBackend};
use crate::error::{GenAiError, GenAiResult};
use crate::types::{GeneratedImage, GenerationRequest, GenerationResponse, ImageRequest};

/// A request captured by the mock.
#[derive(Debug, Clone)]
pub enum CapturedRequest {
    Generate(GenerationRequest),
    Stream(GenerationRequest),
    Image(ImageRequest),
}

/// Scripted outcome for the next call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Chunks(Vec<String>),
    Image(GeneratedImage),
    /// A full response, e.g. text with grounding sources
    Response(GenerationResponse),
    /// Fails with an HTTP error carrying this status and body
    HttpError(u16, String),
    /// Fails with a transport error
    NetworkError(String),
}

/// Mock backend.
#[derive(Clone, Default)]
pub struct MockBackend {
    replies: Arc<RwLock<VecDeque<MockReply>>>,
    captured: Arc<RwLock<Vec<CapturedRequest>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next call.
    pub fn reply(self, reply: MockReply) -> Self {
        self.replies.write().push_back(reply);
        self
    }

    pub fn reply_text(self, text: impl Into<String>) -> Self {
        self.reply(MockReply::Text(text.into()))
    }

    pub fn reply_chunks<S: Into<String>>(self, chunks: impl IntoIterator<Item = S>) -> Self {
        self.reply(MockReply::Chunks(chunks.into_iter().map(Into::into).collect()))
    }

    pub fn reply_image(self, image: GeneratedImage) -> Self {
        self.reply(MockReply::Image(image))
    }

    pub fn reply_response(self, response: GenerationResponse) -> Self {
        self.reply(MockReply::Response(response))
    }

    pub fn reply_error(self, status: u16, body: impl Into<String>) -> Self {
        self.reply(MockReply::HttpError(status, body.into()))
    }

    /// Get all captured requests.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.read().clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.captured.read().len()
    }

    fn next_reply(&self, captured: CapturedRequest) -> GenAiResult<MockReply> {
        self.captured.write().push(captured);
        let reply = self
            .replies
            .write()
            .pop_front()
            .unwrap_or_else(|| MockReply::Text(String::new()));
        match reply {
            MockReply::HttpError(status, body) => Err(GenAiError::Http { status, body }),
            MockReply::NetworkError(msg) => Err(GenAiError::Network(msg)),
            other => Ok(other),
        }
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(&self, request: &GenerationRequest) -> GenAiResult<GenerationResponse> {
        match self.next_reply(CapturedRequest::Generate(request.clone()))? {
            MockReply::Text(text) if text.is_empty() => Err(GenAiError::EmptyResponse),
            MockReply::Text(text) => Ok(GenerationResponse::from_text(text)),
            MockReply::Chunks(chunks) => Ok(GenerationResponse::from_text(chunks.concat())),
            MockReply::Image(image) => Ok(GenerationResponse::from_image(image)),
            MockReply::Response(response) => Ok(response),
            MockReply::HttpError(..) | MockReply::NetworkError(..) => Err(GenAiError::EmptyResponse),
        }
    }

    async fn generate_stream(
        &self,
        request: &GenerationRequest,
        on_chunk: ChunkSink<'_>,
    ) -> GenAiResult<()> {
        let chunks = match self.next_reply(CapturedRequest::Stream(request.clone()))? {
            MockReply::Chunks(chunks) => chunks,
            MockReply::Text(text) => vec![text],
            MockReply::Response(response) => vec![response.text],
            _ => Vec::new(),
        };
        for chunk in chunks.iter().filter(|c| !c.is_empty()) {
            on_chunk(chunk.as_str());
        }
        Ok(())
    }

    async fn generate_image(&self, request: &ImageRequest) -> GenAiResult<GeneratedImage> {
        match self.next_reply(CapturedRequest::Image(request.clone()))? {
            MockReply::Image(image) => Ok(image),
            _ => Err(GenAiError::EmptyResponse),
        }
    }
}
