//! UXCraft CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid input
//! - 3: Validation failure
//! - 4: Generation failure

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

use craft_chat::ChatError;
use craft_genai::GenAiError;
use craft_wireframe::WireframeError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_INPUT: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const GENERATION_FAILURE: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let mut filter = EnvFilter::from_default_env();
    for directive in [
        "warn".to_string(),
        format!("uxcraft={}", level),
        format!("craft={}", level),
    ] {
        if let Ok(directive) = directive.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::Wireframe(args) => commands::wireframe::execute(args).await,
        Commands::Chat(args) => commands::chat::execute(args).await,
        Commands::Genius(args) => commands::genius::execute(args).await,
        Commands::Image(args) => commands::image::execute(args).await,
        Commands::Quick(args) => commands::quick::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<WireframeError>() {
        return match err {
            WireframeError::Input(_) | WireframeError::Busy => ExitCodes::INVALID_INPUT,
            WireframeError::Validation(_) => ExitCodes::VALIDATION_FAILURE,
            WireframeError::Generation(_) => ExitCodes::GENERATION_FAILURE,
            WireframeError::Io(_) | WireframeError::Json(_) => ExitCodes::GENERAL_ERROR,
        };
    }
    if let Some(err) = e.downcast_ref::<ChatError>() {
        return match err {
            ChatError::Input(_) => ExitCodes::INVALID_INPUT,
            ChatError::Generation(_) => ExitCodes::GENERATION_FAILURE,
            _ => ExitCodes::GENERAL_ERROR,
        };
    }
    if let Some(err) = e.downcast_ref::<GenAiError>() {
        return match err {
            GenAiError::NotConfigured | GenAiError::InvalidSettings(_) => ExitCodes::INVALID_INPUT,
            GenAiError::Io(_) => ExitCodes::GENERAL_ERROR,
            _ => ExitCodes::GENERATION_FAILURE,
        };
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("validation") {
        ExitCodes::VALIDATION_FAILURE
    } else if msg.contains("argument") || msg.contains("out of range") || msg.contains("not found") {
        ExitCodes::INVALID_INPUT
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
