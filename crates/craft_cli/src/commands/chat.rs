//! Chat command - interactive chat with streamed replies.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use tracing::info;

use craft_chat::{export_transcript, Attachment, ChatSession};
use craft_genai::GenerationBackend;

#[derive(Args)]
pub struct ChatArgs {
    /// Model to chat with
    #[arg(short, long)]
    model: Option<String>,

    /// Save the transcript here on exit (.md or .json)
    #[arg(long)]
    save: Option<PathBuf>,
}

/// A line typed at the prompt.
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Quit,
    Attach(&'a str),
    Save(&'a str),
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line == "/quit" || line == "/exit" {
        Input::Quit
    } else if let Some(path) = line.strip_prefix("/attach ") {
        Input::Attach(path.trim())
    } else if let Some(path) = line.strip_prefix("/save ") {
        Input::Save(path.trim())
    } else {
        Input::Message(line)
    }
}

pub async fn execute(args: ChatArgs) -> Result<()> {
    let mut session = ChatSession::new(super::backend()?);
    if let Some(model) = &args.model {
        session = session.with_model(model);
    }

    println!("💬 Ask anything. /attach <image> adds a file, /save <file> saves the transcript, /quit exits.");

    let stdin = io::stdin();
    let mut pending: Option<Attachment> = None;
    for line in stdin.lock().lines() {
        let line = line?;
        match parse_input(&line) {
            Input::Quit => break,
            Input::Attach(path) => match Attachment::from_path(Path::new(path)) {
                Ok(attachment) => {
                    println!("📎 {}", attachment.file_name);
                    pending = Some(attachment);
                }
                Err(e) => eprintln!("⚠️  {}", e),
            },
            Input::Save(path) => save(&session, Path::new(path)),
            Input::Message(text) => {
                if text.is_empty() && pending.is_none() {
                    continue;
                }
                send(&mut session, text, pending.take()).await;
            }
        }
    }

    if let Some(path) = &args.save {
        save(&session, path);
    }
    info!("Chat ended after {} messages", session.transcript().messages().len());
    Ok(())
}

/// Send one turn, printing chunks as they arrive. Failures stay in the transcript.
async fn send<B: GenerationBackend>(
    session: &mut ChatSession<B>,
    text: &str,
    attachment: Option<Attachment>,
) {
    let result = session
        .send_with(text, attachment, |chunk| {
            print!("{}", chunk);
            let _ = io::stdout().flush();
        })
        .await;
    match result {
        Ok(_) => println!(),
        Err(e) => eprintln!("\n❌ Error: {}", e),
    }
}

fn save<B: GenerationBackend>(session: &ChatSession<B>, path: &Path) {
    match export_transcript(path, session.transcript()) {
        Ok(()) => println!("💾 Saved transcript to {}", path.display()),
        Err(e) => eprintln!("⚠️  {}", e),
    }
}
