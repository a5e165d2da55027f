//! UXCraft chat and UX Genius.
//!
//! - [`ChatSession`] streams multi-turn replies into a [`Transcript`]
//! - [`GeniusClient`] answers design-ideas, persona and free-form prompts
//! - [`ImageStudio`] generates, edits and describes images
//! - [`QuickTools`] runs web-grounded research and quick suggestions
//! - [`export_markdown`] writes generated text to disk

pub mod error;
pub mod export;
pub mod genius;
pub mod image;
pub mod quick;
pub mod session;
pub mod transcript;
pub mod types;

pub use error::{ChatError, ChatResult};
pub use export::{export_markdown, export_transcript, DEFAULT_EXPORT_FILE};
pub use genius::{GeniusClient, GeniusPrompt, PersonaBrief, UX_CRAFT_SYSTEM_INSTRUCTION};
pub use image::{save_image, ImageStudio, DEFAULT_IMAGE_FILE};
pub use quick::{check_prompt, QuickAnswer, QuickTool, QuickTools};
pub use session::ChatSession;
pub use transcript::{Transcript, TurnState};
pub use types::{Attachment, ChatMessage, Sender, MAX_ATTACHMENT_BYTES};
