//! Quick tools: web-grounded research and fast suggestions.

use std::fmt;

use craft_genai::{
    GenerationBackend, GenerationConfig, GenerationRequest, GroundingSource, FLASH_MODEL,
    LITE_MODEL,
};
use tracing::info;

use crate::error::{ChatError, ChatResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickTool {
    /// Answer grounded in web search, with sources
    Researcher,
    /// Short answer from the low-latency model
    Suggest,
}

impl QuickTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Researcher => "researcher",
            Self::Suggest => "suggest",
        }
    }

    pub fn model(&self) -> &'static str {
        match self {
            Self::Researcher => FLASH_MODEL,
            Self::Suggest => LITE_MODEL,
        }
    }

    /// File name offered when saving the answer.
    pub fn export_file(&self) -> String {
        format!("ux-quick-tool-{}.md", self.as_str())
    }

    pub fn request(&self, prompt: &str) -> GenerationRequest {
        let config = match self {
            Self::Researcher => GenerationConfig::default().with_google_search(),
            Self::Suggest => GenerationConfig::default(),
        };
        GenerationRequest::new(self.model(), prompt).config(config)
    }
}

impl fmt::Display for QuickTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer text plus the web sources it was grounded on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickAnswer {
    pub text: String,
    pub sources: Vec<GroundingSource>,
}

impl QuickAnswer {
    /// Numbered source list, or `None` when there are no sources.
    pub fn sources_markdown(&self) -> Option<String> {
        if self.sources.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .sources
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. [{}]({})", i + 1, s.title, s.uri))
            .collect();
        Some(format!("Sources:\n{}", lines.join("\n")))
    }
}

/// Reject a blank prompt before any request is built.
pub fn check_prompt(prompt: &str) -> ChatResult<()> {
    if prompt.trim().is_empty() {
        return Err(ChatError::Input("Please enter a prompt.".to_string()));
    }
    Ok(())
}

pub struct QuickTools<B> {
    backend: B,
}

impl<B: GenerationBackend> QuickTools<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub async fn run(&self, tool: QuickTool, prompt: &str) -> ChatResult<QuickAnswer> {
        check_prompt(prompt)?;
        info!("Running quick {} on {}", tool, tool.model());
        let response = self.backend.generate(&tool.request(prompt)).await?;
        let sources = match tool {
            QuickTool::Researcher => response.sources,
            QuickTool::Suggest => Vec::new(),
        };
        Ok(QuickAnswer {
            text: response.text,
            sources,
        })
    }
}
