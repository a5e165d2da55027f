//! Layout schemas.
//!
//! Two views of the same contract:
//! - [`response_schema`] travels with the generation request as output-format
//!   guidance, in the API's OpenAPI-style dialect.
//! - [`validation_schema`] is a JSON Schema checked locally on every reply
//!   before it is decoded into a [`crate::Layout`].

use std::sync::OnceLock;

use jsonschema::JSONSchema;
use serde_json::{json, Value};

use crate::error::{WireframeError, WireframeResult};
use crate::models::{
    Alignment, ColorRole, ComponentKind, FontSize, FontWeight, LayoutMode, Size, Spacing, Theme,
    Variant,
};

fn options(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Output-format guidance attached to the structured generation request.
pub fn response_schema() -> Value {
    let kinds: Vec<&str> = ComponentKind::KNOWN.iter().map(|k| k.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "screenTitle": {
                "type": "STRING",
                "description": "A descriptive title for the screen, e.g., \"User Login Screen\"."
            },
            "theme": {
                "type": "STRING",
                "description": format!("The overall color theme. Valid options: {}.", options(&Theme::wire_values()))
            },
            "spacing": {
                "type": "STRING",
                "description": format!("The gap between components for flow layouts. Valid options: {}.", options(&Spacing::wire_values()))
            },
            "layout": {
                "type": "STRING",
                "description": format!("The overall layout. Valid options: {}.", options(&LayoutMode::wire_values()))
            },
            "components": {
                "type": "ARRAY",
                "description": "An array of UI components on the screen.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": {
                            "type": "STRING",
                            "description": format!("Component type. Valid options: {}.", options(&kinds))
                        },
                        "properties": {
                            "type": "OBJECT",
                            "properties": {
                                "text": { "type": "STRING" },
                                "placeholder": { "type": "STRING" },
                                "variant": { "type": "STRING", "description": format!("Options: {}.", options(&Variant::wire_values())) },
                                "size": { "type": "STRING", "description": format!("Options: {}.", options(&Size::wire_values())) },
                                "color": { "type": "STRING", "description": format!("Options: {}.", options(&ColorRole::wire_values())) },
                                "backgroundColor": { "type": "STRING" },
                                "alignment": { "type": "STRING", "description": format!("Options: {}.", options(&Alignment::wire_values())) },
                                "fontWeight": { "type": "STRING", "description": format!("Options: {}.", options(&FontWeight::wire_values())) },
                                "fontSize": { "type": "STRING", "description": format!("Options: {}.", options(&FontSize::wire_values())) }
                            }
                        },
                        "position": {
                            "type": "OBJECT",
                            "description": "Required for 'absolute' layout. All values are percentages (0-100).",
                            "properties": {
                                "top": { "type": "NUMBER" },
                                "left": { "type": "NUMBER" },
                                "width": { "type": "NUMBER" },
                                "height": { "type": "NUMBER" }
                            }
                        },
                        "style": {
                            "type": "OBJECT",
                            "description": "Optional additional CSS styles.",
                            "properties": {
                                "borderRadius": { "type": "STRING" },
                                "boxShadow": { "type": "STRING" },
                                "opacity": { "type": "NUMBER" }
                            }
                        }
                    },
                    "required": ["type", "properties"]
                }
            }
        },
        "required": ["screenTitle", "theme", "spacing", "layout", "components"]
    })
}

/// JSON Schema enforced on every structured reply.
///
/// Component `type` is deliberately an open string: unknown kinds are
/// rendered as a fallback, not rejected.
pub fn validation_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["screenTitle", "theme", "spacing", "layout", "components"],
        "properties": {
            "screenTitle": { "type": "string" },
            "theme": { "enum": Theme::wire_values() },
            "spacing": { "enum": Spacing::wire_values() },
            "layout": { "enum": LayoutMode::wire_values() },
            "components": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["type", "properties"],
                    "properties": {
                        "type": { "type": "string" },
                        "properties": {
                            "type": "object",
                            "properties": {
                                "text": { "type": "string" },
                                "placeholder": { "type": "string" },
                                "variant": { "enum": Variant::wire_values() },
                                "size": { "enum": Size::wire_values() },
                                "color": { "enum": ColorRole::wire_values() },
                                "backgroundColor": { "type": "string" },
                                "alignment": { "enum": Alignment::wire_values() },
                                "fontWeight": { "enum": FontWeight::wire_values() },
                                "fontSize": { "enum": FontSize::wire_values() }
                            }
                        },
                        "position": {
                            "type": "object",
                            "required": ["top", "left", "width", "height"],
                            "properties": {
                                "top": { "type": "number" },
                                "left": { "type": "number" },
                                "width": { "type": "number" },
                                "height": { "type": "number" }
                            }
                        },
                        "style": {
                            "type": "object",
                            "properties": {
                                "borderRadius": { "type": "string" },
                                "boxShadow": { "type": "string" },
                                "opacity": { "type": "number" }
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Compiled [`validation_schema`], built once per process.
pub struct SchemaValidator {
    compiled: JSONSchema,
}

impl SchemaValidator {
    pub fn shared() -> &'static SchemaValidator {
        static VALIDATOR: OnceLock<SchemaValidator> = OnceLock::new();
        VALIDATOR.get_or_init(|| SchemaValidator {
            // The schema is a constant; failing to compile it is a programming error.
            compiled: JSONSchema::compile(&validation_schema())
                .expect("layout validation schema compiles"),
        })
    }

    /// Check `instance`, collecting every violation.
    pub fn validate(&self, instance: &Value) -> WireframeResult<()> {
        match self.compiled.validate(instance) {
            Ok(()) => Ok(()),
            Err(errors) => {
                let messages: Vec<String> = errors
                    .map(|e| {
                        let path = e.instance_path.to_string();
                        let path = if path.is_empty() { "/".to_string() } else { path };
                        format!("{}: {}", path, e)
                    })
                    .collect();
                Err(WireframeError::Validation(messages))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Value {
        json!({
            "screenTitle": "Login",
            "theme": "dark",
            "spacing": "normal",
            "layout": "single-column",
            "components": [
                { "type": "header", "properties": { "text": "Welcome" } },
                { "type": "carousel", "properties": {} }
            ]
        })
    }

    #[test]
    fn test_valid_layout_passes() {
        assert!(SchemaValidator::shared().validate(&valid()).is_ok());
    }

    #[test]
    fn test_enum_violation_is_reported() {
        let mut value = valid();
        value["layout"] = json!("three-column");
        let err = SchemaValidator::shared().validate(&value).unwrap_err();
        match err {
            WireframeError::Validation(messages) => {
                assert_eq!(messages.len(), 1);
                assert!(messages[0].starts_with("/layout"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_properties_is_reported() {
        let mut value = valid();
        value["components"][1] = json!({ "type": "button" });
        value.as_object_mut().unwrap().remove("theme");
        let err = SchemaValidator::shared().validate(&value).unwrap_err();
        match err {
            WireframeError::Validation(messages) => assert_eq!(messages.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_response_schema_lists_required_fields() {
        let schema = response_schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 5);
        assert_eq!(
            schema["properties"]["components"]["items"]["required"],
            json!(["type", "properties"])
        );
        let layout_doc = schema["properties"]["layout"]["description"].as_str().unwrap();
        assert!(layout_doc.contains("'grid-2x2'"));
    }
}
