//! Chat session streaming replies from a generation backend.

use craft_genai::{Content, GenAiError, GenerationBackend, GenerationRequest, Part, FLASH_MODEL};
use tracing::{debug, info, warn};

use crate::error::{ChatError, ChatResult};
use crate::transcript::Transcript;
use crate::types::Attachment;

/// A multi-turn conversation.
///
/// Every send carries the whole successful history, so the backend needs no
/// server-side chat state.
pub struct ChatSession<B> {
    backend: B,
    model: String,
    transcript: Transcript,
    history: Vec<Content>,
}

impl<B: GenerationBackend> ChatSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            model: FLASH_MODEL.to_string(),
            transcript: Transcript::new(),
            history: Vec::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Turns the backend has seen, alternating user and model.
    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Send a message and collect the streamed reply.
    pub async fn send(&mut self, text: &str, attachment: Option<Attachment>) -> ChatResult<String> {
        self.send_with(text, attachment, |_| {}).await
    }

    /// Like [`send`](Self::send), also handing each chunk to `on_chunk` as it arrives.
    pub async fn send_with<F>(
        &mut self,
        text: &str,
        attachment: Option<Attachment>,
        mut on_chunk: F,
    ) -> ChatResult<String>
    where
        F: FnMut(&str) + Send,
    {
        self.transcript.begin_turn(text, attachment.as_ref())?;

        let mut parts = Vec::new();
        if let Some(attachment) = attachment {
            parts.push(Part::inline(attachment.mime_type, attachment.data));
        }
        if !text.trim().is_empty() {
            parts.push(Part::text(text));
        }
        let user_turn = Content::user(parts);

        let mut contents = self.history.clone();
        contents.push(user_turn.clone());
        let request = GenerationRequest::with_contents(&self.model, contents);
        debug!("Sending chat turn with {} prior turns", self.history.len());

        let mut reply = String::new();
        let transcript = &mut self.transcript;
        let mut sink = |chunk: &str| {
            reply.push_str(chunk);
            if let Err(e) = transcript.append_chunk(chunk) {
                warn!("Dropping chunk: {}", e);
            }
            on_chunk(chunk);
        };
        let result = self
            .backend
            .generate_stream(&request, &mut sink)
            .await
            .and_then(|()| {
                if reply.trim().is_empty() {
                    Err(GenAiError::EmptyResponse)
                } else {
                    Ok(())
                }
            });

        match result {
            Ok(()) => {
                self.transcript.finish_turn();
                self.history.push(user_turn);
                self.history.push(Content::model_text(reply.clone()));
                info!("Chat reply complete ({} chars)", reply.len());
                Ok(reply)
            }
            Err(e) => {
                let err = ChatError::from(e);
                self.transcript.fail_turn(&err.to_string());
                Err(err)
            }
        }
    }
}
