//! File sinks for generated text.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::ChatResult;
use crate::transcript::Transcript;

/// File name used when the caller gives none.
pub const DEFAULT_EXPORT_FILE: &str = "ux-genius-output.md";

/// Write markdown text to `path`, creating parent directories as needed.
pub fn export_markdown(path: &Path, text: &str) -> ChatResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    info!("Wrote {} bytes to {:?}", text.len(), path);
    Ok(())
}

/// Save a transcript; `.json` paths get the message list, anything else markdown.
pub fn export_transcript(path: &Path, transcript: &Transcript) -> ChatResult<()> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        let json = serde_json::to_string_pretty(transcript.messages())?;
        export_markdown(path, &json)
    } else {
        export_markdown(path, &transcript.to_markdown())
    }
}
