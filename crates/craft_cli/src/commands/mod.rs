//! CLI command definitions.
//!
//! Each subcommand maps to one UXCraft tool.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use craft_genai::{GeminiClient, GenAiSettings};

pub mod chat;
pub mod genius;
pub mod image;
pub mod quick;
pub mod wireframe;

/// UXCraft - AI-assisted UX design toolkit
#[derive(Parser)]
#[command(name = "uxcraft")]
#[command(version, about = "UXCraft - AI-assisted UX design toolkit")]
#[command(long_about = r#"
UXCraft turns prompts into UX artifacts: interactive wireframes, design
ideas, personas, images and free-form answers from a senior UX designer
persona.

TOOLS:
  wireframe generate → Generate a wireframe layout from a prompt
  wireframe render   → Render a saved layout to an HTML preview (offline)
  wireframe inspect  → Show the properties, suggestions or JSON panel
  chat               → Interactive chat with streamed replies
  genius             → Design ideas, personas and free-form UX answers
  image generate     → Generate an image from a prompt
  image edit         → Edit an image with a prompt
  image analyze      → Ask a question about an image
  quick research     → Web-grounded answer with sources
  quick suggest      → Fast suggestion from a lightweight model

CONFIGURATION:
  GEMINI_API_KEY (or API_KEY)   API key for the generation service
  UXCRAFT_MODEL                 Override the text model
  .uxcraft/settings.json        Optional defaultModel / baseUrl

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid input
  3 - Validation failure
  4 - Generation failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate, render and inspect wireframes
    Wireframe(wireframe::WireframeArgs),

    /// Chat with streamed replies
    Chat(chat::ChatArgs),

    /// UX Genius: design ideas, personas and free-form prompts
    Genius(genius::GeniusArgs),

    /// Generate, edit and analyze images
    Image(image::ImageArgs),

    /// Grounded research and quick suggestions
    Quick(quick::QuickArgs),
}

/// Generation client configured from the environment and the working directory.
pub fn backend() -> Result<GeminiClient> {
    let current_dir = std::env::current_dir()?;
    let settings = GenAiSettings::from_workspace(&current_dir)
        .context("Failed to configure the generation API")?;
    Ok(GeminiClient::new(settings))
}
