//! Image command - generate, edit and describe images.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use craft_chat::{export_markdown, save_image, Attachment, ImageStudio, DEFAULT_IMAGE_FILE};
use craft_genai::{AspectRatio, GeneratedImage};

#[derive(Args)]
pub struct ImageArgs {
    #[command(subcommand)]
    command: ImageCommand,
}

#[derive(Subcommand)]
enum ImageCommand {
    /// Generate an image from a prompt
    Generate {
        #[arg(short, long)]
        prompt: String,

        /// One of 1:1, 16:9, 9:16, 4:3, 3:4
        #[arg(short, long, default_value = "1:1", value_parser = parse_aspect_ratio)]
        aspect_ratio: AspectRatio,

        /// Where to save the image
        #[arg(short, long, default_value = DEFAULT_IMAGE_FILE)]
        out: PathBuf,
    },

    /// Edit an image with a prompt
    Edit {
        /// Source image (png, jpg, gif, webp, heic)
        #[arg(short, long)]
        image: Option<PathBuf>,

        #[arg(short, long, default_value = "")]
        prompt: String,

        /// Where to save the edited image
        #[arg(short, long, default_value = DEFAULT_IMAGE_FILE)]
        out: PathBuf,
    },

    /// Ask a question about an image
    Analyze {
        /// Image to describe
        #[arg(short, long)]
        image: Option<PathBuf>,

        #[arg(short, long, default_value = "")]
        prompt: String,

        /// Save the answer as markdown
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn parse_aspect_ratio(value: &str) -> std::result::Result<AspectRatio, String> {
    AspectRatio::parse(value).ok_or_else(|| {
        let allowed: Vec<&str> = AspectRatio::ALL.iter().map(|r| r.as_str()).collect();
        format!("expected one of {}", allowed.join(", "))
    })
}

fn load_image(path: Option<&Path>) -> Result<Option<Attachment>> {
    Ok(match path {
        Some(path) => Some(Attachment::from_path(path)?),
        None => None,
    })
}

fn write_image(path: &Path, image: &GeneratedImage) -> Result<()> {
    save_image(path, image)?;
    println!("🖼️  Saved {} to {}", image.mime_type, path.display());
    Ok(())
}

pub async fn execute(args: ImageArgs) -> Result<()> {
    match args.command {
        ImageCommand::Generate {
            prompt,
            aspect_ratio,
            out,
        } => {
            let studio = ImageStudio::new(super::backend()?);
            println!("🎨 Generating...");
            let image = studio.generate(&prompt, aspect_ratio).await?;
            write_image(&out, &image)
        }
        ImageCommand::Edit { image, prompt, out } => {
            let image = load_image(image.as_deref())?;
            let studio = ImageStudio::new(super::backend()?);
            println!("🎨 Editing...");
            let edited = studio.edit(image.as_ref(), &prompt).await?;
            write_image(&out, &edited)
        }
        ImageCommand::Analyze { image, prompt, out } => {
            let image = load_image(image.as_deref())?;
            let studio = ImageStudio::new(super::backend()?);
            println!("🔍 Analyzing...");
            let answer = studio.analyze(image.as_ref(), &prompt).await?;
            println!("\n{}", answer);
            if let Some(path) = &out {
                export_markdown(path, &answer)?;
                println!("\n💾 Saved to {}", path.display());
            }
            Ok(())
        }
    }
}
