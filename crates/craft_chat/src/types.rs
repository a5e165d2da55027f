//! Chat message and attachment types.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChatError, ChatResult};

/// Largest accepted attachment.
pub const MAX_ATTACHMENT_BYTES: usize = 4 * 1024 * 1024;

pub const ATTACHMENT_TOO_LARGE: &str = "File is too large. Please select a file smaller than 4MB.";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One entry of the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    /// File name of an attached image, for user messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text.into())
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text.into())
    }

    fn new(sender: Sender, text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            text,
            attachment: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_attachment(mut self, file_name: impl Into<String>) -> Self {
        self.attachment = Some(file_name.into());
        self
    }
}

/// An image sent along with a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    /// Base64 encoded file content
    pub data: String,
}

impl Attachment {
    /// Encode raw file bytes, rejecting anything over [`MAX_ATTACHMENT_BYTES`].
    pub fn from_bytes(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: &[u8],
    ) -> ChatResult<Self> {
        if bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(ChatError::Input(ATTACHMENT_TOO_LARGE.to_string()));
        }
        Ok(Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: BASE64_STANDARD.encode(bytes),
        })
    }

    /// Read an image file from disk.
    pub fn from_path(path: &Path) -> ChatResult<Self> {
        let mime_type = image_mime_type(path).ok_or_else(|| {
            ChatError::Input(format!("Only image files can be attached: {}", path.display()))
        })?;
        // Check the size before reading the whole file
        if std::fs::metadata(path)?.len() > MAX_ATTACHMENT_BYTES as u64 {
            return Err(ChatError::Input(ATTACHMENT_TOO_LARGE.to_string()));
        }
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_bytes(file_name, mime_type, &bytes)
    }
}

/// MIME type for common image extensions.
pub fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_size_limit() {
        let ok = Attachment::from_bytes("a.png", "image/png", &[0u8; 16]).unwrap();
        assert_eq!(ok.data, BASE64_STANDARD.encode([0u8; 16]));

        let big = vec![0u8; MAX_ATTACHMENT_BYTES + 1];
        let err = Attachment::from_bytes("big.png", "image/png", &big).unwrap_err();
        assert_eq!(err.to_string(), ATTACHMENT_TOO_LARGE);

        let exact = vec![0u8; MAX_ATTACHMENT_BYTES];
        assert!(Attachment::from_bytes("edge.png", "image/png", &exact).is_ok());
    }

    #[test]
    fn test_image_mime_type() {
        assert_eq!(image_mime_type(Path::new("shot.PNG")), Some("image/png"));
        assert_eq!(image_mime_type(Path::new("photo.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime_type(Path::new("notes.txt")), None);
        assert_eq!(image_mime_type(Path::new("README")), None);
    }

    #[test]
    fn test_message_serialization() {
        let msg = ChatMessage::user("hello").with_attachment("a.png");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["sender"], "user");
        assert_eq!(value["attachment"], "a.png");
        assert!(value.get("createdAt").is_some());
        assert!(serde_json::to_value(ChatMessage::bot("hi")).unwrap().get("attachment").is_none());
    }
}
