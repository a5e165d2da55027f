//! Genius command - long-form UX artifacts.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use craft_chat::{export_markdown, GeniusClient, GeniusPrompt, PersonaBrief};

#[derive(Args)]
pub struct GeniusArgs {
    #[command(subcommand)]
    command: GeniusCommand,

    /// Save the answer as markdown
    #[arg(long, global = true)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum GeniusCommand {
    /// Free-form UX question or artifact request
    Free {
        /// The request, e.g. user stories for a feature
        prompt: String,
    },

    /// 3-5 design ideas with pros and cons
    Ideas {
        /// The UX problem to solve
        problem: String,
    },

    /// User persona summary
    Persona {
        #[arg(long)]
        name: Option<String>,

        /// Primary goal
        #[arg(long)]
        goal: String,

        /// Tech comfort level
        #[arg(long)]
        tech_comfort: Option<String>,

        /// Context or scenario
        #[arg(long)]
        context: Option<String>,

        /// Key pain points
        #[arg(long)]
        pain_points: String,
    },
}

fn build_prompt(command: GeniusCommand) -> Result<GeniusPrompt> {
    let prompt = match command {
        GeniusCommand::Free { prompt } => GeniusPrompt::free_form(prompt)?,
        GeniusCommand::Ideas { problem } => GeniusPrompt::design_ideas(problem)?,
        GeniusCommand::Persona {
            name,
            goal,
            tech_comfort,
            context,
            pain_points,
        } => GeniusPrompt::persona(PersonaBrief {
            name,
            goal,
            tech_comfort,
            context,
            pain_points,
        })?,
    };
    Ok(prompt)
}

pub async fn execute(args: GeniusArgs) -> Result<()> {
    // Validate before touching the network configuration
    let prompt = build_prompt(args.command)?;
    let client = GeniusClient::new(super::backend()?);

    println!("🧠 Thinking...");
    let answer = client.generate(&prompt).await?;
    println!("\n{}", answer);

    if let Some(path) = &args.out {
        export_markdown(path, &answer)?;
        println!("\n💾 Saved to {}", path.display());
    }
    Ok(())
}
