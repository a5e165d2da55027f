//! Wireframe commands - generate, render and inspect layouts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use tracing::{info, warn};

use craft_wireframe::{
    decode_layout, inspect, render_preview, to_document, ClickAction, InspectorTab, Layout,
    LayoutGenerator, LayoutValidator, RenderStyle, Selection, SelectionState, WireframeError,
    WireframeTool,
};

#[derive(Args)]
pub struct WireframeArgs {
    #[command(subcommand)]
    command: WireframeCommand,
}

#[derive(Subcommand)]
enum WireframeCommand {
    /// Generate a layout from a prompt
    Generate(GenerateArgs),

    /// Render a saved layout to an HTML preview
    Render(RenderArgs),

    /// Show one inspector panel for a saved layout
    Inspect(InspectArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Clean,
    Sketch,
}

impl From<StyleArg> for RenderStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Clean => RenderStyle::Clean,
            StyleArg::Sketch => RenderStyle::Sketch,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TabArg {
    Properties,
    Suggestions,
    Json,
}

impl From<TabArg> for InspectorTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Properties => InspectorTab::Properties,
            TabArg::Suggestions => InspectorTab::Suggestions,
            TabArg::Json => InspectorTab::Json,
        }
    }
}

#[derive(Args)]
struct GenerateArgs {
    /// Description of the screen
    #[arg(short, long)]
    prompt: String,

    /// Render style of the preview
    #[arg(short, long, value_enum, default_value = "clean")]
    style: StyleArg,

    /// Write the HTML preview to this file
    #[arg(long)]
    out_html: Option<PathBuf>,

    /// Write the layout JSON to this file
    #[arg(long)]
    out_json: Option<PathBuf>,
}

#[derive(Args)]
struct RenderArgs {
    /// Layout JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Render style of the preview
    #[arg(short, long, value_enum, default_value = "clean")]
    style: StyleArg,

    /// Index of the component to show as selected
    #[arg(long)]
    select: Option<usize>,

    /// Write the HTML preview to this file instead of stdout
    #[arg(long)]
    out_html: Option<PathBuf>,
}

#[derive(Args)]
struct InspectArgs {
    /// Layout JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Index of the component to inspect
    #[arg(long)]
    select: Option<usize>,

    /// Inspector panel
    #[arg(short, long, value_enum, default_value = "properties")]
    tab: TabArg,
}

pub async fn execute(args: WireframeArgs) -> Result<()> {
    match args.command {
        WireframeCommand::Generate(args) => generate(args).await,
        WireframeCommand::Render(args) => render(args),
        WireframeCommand::Inspect(args) => inspect_layout(args),
    }
}

async fn generate(args: GenerateArgs) -> Result<()> {
    let generator = LayoutGenerator::new(super::backend()?);
    let mut tool = WireframeTool::new(generator);
    tool.set_prompt(&args.prompt);
    tool.set_render_style(args.style.into());

    println!("🎨 Generating wireframe...");
    tool.generate().await?;

    let json = tool.export_json()?.unwrap_or_default();
    if let Some(layout) = tool.layout() {
        print_summary(layout);
    }

    if let Some(path) = &args.out_json {
        write_file(path, &json)?;
        println!("   📄 Layout JSON: {}", path.display());
    }
    if let Some(path) = &args.out_html {
        if let (Some(layout), Some(preview)) = (tool.layout(), tool.preview()) {
            write_file(path, &to_document(&layout.screen_title, &preview))?;
            println!("   🖼️  Preview: {}", path.display());
        }
    }
    if args.out_json.is_none() && args.out_html.is_none() {
        println!("\n{}", json);
    }
    Ok(())
}

fn render(args: RenderArgs) -> Result<()> {
    let layout = load_layout(&args.input)?;
    let selection = select(&layout, args.select)?;

    let preview = render_preview(&layout, args.style.into(), selection.index());
    let html = to_document(&layout.screen_title, &preview);
    match &args.out_html {
        Some(path) => {
            write_file(path, &html)?;
            println!("✅ Preview written to {}", path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

fn inspect_layout(args: InspectArgs) -> Result<()> {
    let layout = load_layout(&args.input)?;
    let selection = select(&layout, args.select)?;

    let view = inspect(&layout, selection, args.tab.into())?;
    print!("{}", view);
    Ok(())
}

/// Read and strictly decode a layout file, reporting advisory warnings.
fn load_layout(path: &Path) -> Result<Layout> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(WireframeError::Input(format!(
                "Layout file not found: {}",
                path.display()
            ))
            .into());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read layout file: {}", path.display()));
        }
    };
    // A bad local file is the caller's input, not a generation failure
    let layout = decode_layout(&text).map_err(|e| match e {
        WireframeError::Generation(_) => WireframeError::Input(format!(
            "{} is not valid layout JSON",
            path.display()
        )),
        other => other,
    })?;

    let report = LayoutValidator::check(&layout);
    for warning in &report.warnings {
        warn!("{}", warning);
    }
    info!(
        "Loaded '{}' ({} components)",
        layout.screen_title,
        layout.len()
    );
    Ok(layout)
}

/// Selection after clicking component `index`, if given.
fn select(layout: &Layout, index: Option<usize>) -> Result<Selection> {
    let mut state = SelectionState::new(layout.len());
    if let Some(index) = index {
        state.apply(ClickAction::Select(index));
        if state.selection() != Selection::Selected(index) {
            anyhow::bail!(
                "Component index {} out of range (layout has {} components)",
                index,
                layout.len()
            );
        }
    }
    Ok(state.selection())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn print_summary(layout: &Layout) {
    println!(
        "✅ {} ({} theme, {} spacing, {})",
        layout.screen_title, layout.theme, layout.spacing, layout.layout
    );
    for (index, component) in layout.components.iter().enumerate() {
        let text = component
            .properties
            .text
            .as_deref()
            .or(component.properties.placeholder.as_deref())
            .unwrap_or("");
        println!("   {:>2}. {:<18} {}", index, component.kind.label(), text);
    }
}
