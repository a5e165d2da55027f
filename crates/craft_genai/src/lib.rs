//! # craft_genai
//!
//! Adapter for the external generative-AI API used by every UXCraft tool.
//!
//! The API is treated as a black box behind [`GenerationBackend`]:
//! - **Text / structured JSON**: one request, one response
//! - **Streaming**: text chunks delivered in arrival order
//! - **Images**: prompt in, base64 bytes out
//!
//! [`GeminiClient`] talks to the real REST endpoint; [`MockBackend`] is a
//! scripted stand-in for tests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use craft_genai::{GeminiClient, GenerationBackend, GenerationRequest, PRO_MODEL};
//!
//! # async fn run() -> craft_genai::GenAiResult<()> {
//! let client = GeminiClient::from_env()?;
//! let response = client
//!     .generate(&GenerationRequest::new(PRO_MODEL, "Three onboarding tips"))
//!     .await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod types;

pub use backend::{ChunkSink, GenerationBackend};
pub use config::{GenAiSettings, DEFAULT_BASE_URL};
pub use error::{GenAiError, GenAiResult};
pub use gemini::{GeminiClient, SseBuffer};
pub use mock::{CapturedRequest, MockBackend, MockReply};
pub use types::*;
