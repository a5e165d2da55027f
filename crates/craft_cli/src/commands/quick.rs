//! Quick command - grounded research and fast suggestions.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use craft_chat::{check_prompt, export_markdown, QuickAnswer, QuickTool, QuickTools};

#[derive(Args)]
pub struct QuickArgs {
    #[command(subcommand)]
    command: QuickCommand,

    /// Save the answer as markdown
    #[arg(long, global = true)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum QuickCommand {
    /// Answer grounded in web search, with sources
    Research { prompt: String },

    /// Quick suggestion from a low-latency model
    Suggest { prompt: String },
}

impl QuickCommand {
    fn split(self) -> (QuickTool, String) {
        match self {
            Self::Research { prompt } => (QuickTool::Researcher, prompt),
            Self::Suggest { prompt } => (QuickTool::Suggest, prompt),
        }
    }
}

/// Answer text followed by its numbered sources.
fn render(answer: &QuickAnswer) -> String {
    match answer.sources_markdown() {
        Some(sources) => format!("{}\n\n{}", answer.text, sources),
        None => answer.text.clone(),
    }
}

pub async fn execute(args: QuickArgs) -> Result<()> {
    let (tool, prompt) = args.command.split();
    // Validate before touching the network configuration
    check_prompt(&prompt)?;
    let tools = QuickTools::new(super::backend()?);

    println!("⚡ Working...");
    let answer = tools.run(tool, &prompt).await?;
    let text = render(&answer);
    println!("\n{}", text);

    if let Some(path) = &args.out {
        export_markdown(path, &text)?;
        println!("\n💾 Saved to {}", path.display());
    }
    Ok(())
}
