//! Settings for the generation API.
//!
//! Resolved in this order:
//! 1. Explicit builder calls
//! 2. `.uxcraft/settings.json` in the workspace (`defaultModel`, `baseUrl`)
//! 3. Environment: `GEMINI_API_KEY` (or `API_KEY`) and `UXCRAFT_MODEL`

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{GenAiError, GenAiResult};

/// Public endpoint of the generation API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for [`crate::GeminiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenAiSettings {
    pub api_key: String,
    pub base_url: String,
    /// Overrides the per-call default model when set
    pub model_override: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    default_model: Option<String>,
    base_url: Option<String>,
}

impl GenAiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model_override: None,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model_override(mut self, model: impl Into<String>) -> Self {
        self.model_override = Some(model.into());
        self
    }

    /// Settings from the process environment.
    pub fn from_env() -> GenAiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> GenAiResult<Self> {
        let api_key = ["GEMINI_API_KEY", "API_KEY"]
            .into_iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.is_empty())
            .ok_or(GenAiError::NotConfigured)?;

        let mut settings = Self::new(api_key);
        if let Some(model) = lookup("UXCRAFT_MODEL").filter(|m| !m.is_empty()) {
            settings = settings.model_override(model);
        }
        Ok(settings)
    }

    /// Environment settings refined by the workspace settings file, if any.
    pub fn from_workspace(workspace_root: &Path) -> GenAiResult<Self> {
        let mut settings = Self::from_env()?;
        let path = workspace_root.join(".uxcraft").join("settings.json");
        if !path.exists() {
            return Ok(settings);
        }

        debug!("Loading generation settings from {:?}", path);
        let content = std::fs::read_to_string(&path)?;
        let file: SettingsFile = serde_json::from_str(&content)
            .map_err(|e| GenAiError::InvalidSettings(format!("{}: {}", path.display(), e)))?;

        if let Some(model) = file.default_model {
            settings = settings.model_override(model);
        }
        if let Some(url) = file.base_url {
            settings = settings.base_url(url);
        }
        Ok(settings)
    }

    /// The model to use for a call whose default is `default_model`.
    pub fn resolve_model<'a>(&'a self, default_model: &'a str) -> &'a str {
        self.model_override.as_deref().unwrap_or(default_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_key_is_not_configured() {
        let result = GenAiSettings::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(GenAiError::NotConfigured)));

        let result = GenAiSettings::from_lookup(lookup(&[("GEMINI_API_KEY", "")]));
        assert!(matches!(result, Err(GenAiError::NotConfigured)));
    }

    #[test]
    fn test_key_precedence_and_fallback() {
        let settings =
            GenAiSettings::from_lookup(lookup(&[("GEMINI_API_KEY", "a"), ("API_KEY", "b")]))
                .unwrap();
        assert_eq!(settings.api_key, "a");

        let settings = GenAiSettings::from_lookup(lookup(&[("API_KEY", "b")])).unwrap();
        assert_eq!(settings.api_key, "b");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_model_override() {
        let settings = GenAiSettings::from_lookup(lookup(&[
            ("API_KEY", "k"),
            ("UXCRAFT_MODEL", "gemini-2.5-flash"),
        ]))
        .unwrap();
        assert_eq!(settings.resolve_model("gemini-2.5-pro"), "gemini-2.5-flash");

        let plain = GenAiSettings::new("k");
        assert_eq!(plain.resolve_model("gemini-2.5-pro"), "gemini-2.5-pro");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let settings = GenAiSettings::new("k").base_url("http://localhost:8080/");
        assert_eq!(settings.base_url, "http://localhost:8080");
    }
}
