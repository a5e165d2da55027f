//! Strict decoding of structured replies and advisory layout checks.

use serde_json::Value;
use tracing::debug;

use crate::error::{WireframeError, WireframeResult};
use crate::models::{Layout, LayoutMode};
use crate::schema::SchemaValidator;

/// Decode a structured reply into a [`Layout`].
///
/// - text that is not JSON is a [`WireframeError::Generation`]
/// - JSON that violates the schema is a [`WireframeError::Validation`]
///
/// A decoded layout is handed on unmodified; nothing is repaired.
pub fn decode_layout(text: &str) -> WireframeResult<Layout> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|e| {
        WireframeError::Generation(format!("the model did not return valid JSON: {}", e))
    })?;

    SchemaValidator::shared().validate(&value)?;

    let layout: Layout =
        serde_json::from_value(value).map_err(|e| WireframeError::Validation(vec![e.to_string()]))?;
    debug!(
        "Decoded layout '{}' with {} components",
        layout.screen_title,
        layout.components.len()
    );
    Ok(layout)
}

/// Advisory findings about a decoded layout.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Checks that never block rendering but are worth surfacing.
pub struct LayoutValidator;

impl LayoutValidator {
    pub fn check(layout: &Layout) -> ValidationReport {
        let mut report = ValidationReport::new();

        if layout.screen_title.trim().is_empty() {
            report.add_warning("Screen title is empty");
        }

        for (index, component) in layout.components.iter().enumerate() {
            if !component.kind.is_known() {
                report.add_warning(format!(
                    "Component {} has unknown type '{}' and renders as a placeholder",
                    index, component.kind
                ));
            }

            match (layout.layout, &component.position) {
                (LayoutMode::Absolute, None) => report.add_warning(format!(
                    "Component {} ({}) has no position in an absolute layout and sits at the container origin",
                    index, component.kind
                )),
                (LayoutMode::Absolute, Some(position)) if !position.in_bounds() => {
                    report.add_warning(format!(
                        "Component {} ({}) has a position outside 0-100%",
                        index, component.kind
                    ))
                }
                _ => {}
            }

            if let Some(opacity) = component.style.as_ref().and_then(|s| s.opacity) {
                if !(0.0..=1.0).contains(&opacity) {
                    report.add_warning(format!(
                        "Component {} ({}) has opacity {} outside 0-1",
                        index, component.kind, opacity
                    ));
                }
            }
        }

        report
    }
}
