//! Chat transcript with a streamed bot turn.
//!
//! The bot reply of a turn is built from chunks in the order they arrive.
//! Nothing is reordered or deduplicated.

use tracing::debug;

use crate::error::{ChatError, ChatResult};
use crate::types::{Attachment, ChatMessage, Sender};

pub const EMPTY_MESSAGE_ERROR: &str = "Please enter a message or attach a file.";

/// Progress of the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    /// User message sent, no reply text yet
    AwaitingFirstChunk,
    /// Reply text is arriving into the last message
    Streaming,
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    state: TurnState,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Open a turn with the user's message.
    pub fn begin_turn(&mut self, text: &str, attachment: Option<&Attachment>) -> ChatResult<()> {
        if self.state != TurnState::Idle {
            return Err(ChatError::Busy);
        }
        if text.trim().is_empty() && attachment.is_none() {
            return Err(ChatError::Input(EMPTY_MESSAGE_ERROR.to_string()));
        }

        let mut message = ChatMessage::user(text);
        if let Some(attachment) = attachment {
            message = message.with_attachment(attachment.file_name.clone());
        }
        self.messages.push(message);
        self.state = TurnState::AwaitingFirstChunk;
        Ok(())
    }

    /// Append one streamed chunk to the open bot turn.
    ///
    /// The first chunk opens the bot message; later chunks extend it.
    pub fn append_chunk(&mut self, chunk: &str) -> ChatResult<()> {
        match self.state {
            TurnState::Idle => Err(ChatError::NoOpenTurn),
            _ if chunk.is_empty() => Ok(()),
            TurnState::AwaitingFirstChunk => {
                self.messages.push(ChatMessage::bot(chunk));
                self.state = TurnState::Streaming;
                Ok(())
            }
            TurnState::Streaming => {
                if let Some(last) = self.messages.last_mut() {
                    last.text.push_str(chunk);
                }
                Ok(())
            }
        }
    }

    /// Close the turn with an error message from the bot.
    pub fn fail_turn(&mut self, message: &str) {
        debug!("Turn failed: {}", message);
        self.messages.push(ChatMessage::bot(format!("Error: {}", message)));
        self.state = TurnState::Idle;
    }

    /// Close the turn after the stream ended.
    pub fn finish_turn(&mut self) {
        self.state = TurnState::Idle;
    }

    /// Whether the loading indicator should show.
    pub fn show_loading(&self) -> bool {
        self.state == TurnState::AwaitingFirstChunk
    }

    /// The transcript as a markdown document.
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# Chat transcript\n");
        for message in &self.messages {
            let who = match message.sender {
                Sender::User => "You",
                Sender::Bot => "Gemini",
            };
            out.push_str(&format!("\n**{}:**", who));
            if let Some(file) = &message.attachment {
                out.push_str(&format!(" _[attachment: {}]_", file));
            }
            out.push_str(&format!("\n\n{}\n", message.text));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streamed_turn() {
        let mut t = Transcript::new();
        t.begin_turn("hi", None).unwrap();
        assert!(t.show_loading());
        assert_eq!(t.messages().len(), 1);

        t.append_chunk("Hel").unwrap();
        assert!(!t.show_loading());
        t.append_chunk("").unwrap();
        t.append_chunk("lo").unwrap();
        t.finish_turn();

        assert_eq!(t.state(), TurnState::Idle);
        assert_eq!(t.messages().len(), 2);
        assert_eq!(t.last().unwrap().sender, Sender::Bot);
        assert_eq!(t.last().unwrap().text, "Hello");
    }

    #[test]
    fn test_second_turn_blocked_while_open() {
        let mut t = Transcript::new();
        t.begin_turn("one", None).unwrap();
        assert!(matches!(t.begin_turn("two", None), Err(ChatError::Busy)));
    }

    #[test]
    fn test_empty_message_rejected() {
        let mut t = Transcript::new();
        assert!(t.begin_turn("  ", None).unwrap_err().is_input());
        assert!(t.messages().is_empty());

        let image = Attachment::from_bytes("a.png", "image/png", b"png").unwrap();
        t.begin_turn("", Some(&image)).unwrap();
        assert_eq!(t.messages()[0].attachment.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_failure_after_partial_reply() {
        let mut t = Transcript::new();
        t.begin_turn("hi", None).unwrap();
        t.append_chunk("partial").unwrap();
        t.fail_turn("connection reset");

        let texts: Vec<&str> = t.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["hi", "partial", "Error: connection reset"]);
        assert_eq!(t.state(), TurnState::Idle);
        assert!(matches!(t.append_chunk("late"), Err(ChatError::NoOpenTurn)));
    }

    #[test]
    fn test_markdown() {
        let mut t = Transcript::new();
        t.begin_turn("Question?", None).unwrap();
        t.append_chunk("Answer.").unwrap();
        t.finish_turn();
        let md = t.to_markdown();
        assert!(md.contains("**You:**\n\nQuestion?"));
        assert!(md.contains("**Gemini:**\n\nAnswer."));
    }
}
