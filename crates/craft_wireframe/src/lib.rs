#![recursion_limit = "256"]
//! UXCraft wireframe tool.
//!
//! Turns a prompt into a structured [`Layout`], renders it as an interactive
//! [`VisualNode`] tree in a clean or sketch style, and tracks selection and
//! the inspector panels.
//!
//! ```no_run
//! use craft_genai::GeminiClient;
//! use craft_wireframe::{LayoutGenerator, WireframeTool};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut tool = WireframeTool::new(LayoutGenerator::new(GeminiClient::from_env()?));
//! tool.set_prompt("A login screen with email, password and a sign-in button");
//! tool.generate().await?;
//! tool.click_component(1);
//! println!("{}", tool.inspector()?.expect("layout loaded"));
//! # Ok(())
//! # }
//! ```

pub mod composer;
pub mod error;
pub mod generator;
pub mod inspector;
pub mod models;
pub mod node;
pub mod renderer;
pub mod schema;
pub mod selection;
pub mod suggestions;
pub mod tool;
pub mod validator;

pub use composer::{compose, gap_class, render_preview, sidebar_count};
pub use error::{WireframeError, WireframeResult};
pub use generator::{LayoutGenerator, WIREFRAME_SYSTEM_INSTRUCTION};
pub use inspector::{inspect, InspectorView, PropertyGroup, PropertyRow};
pub use models::*;
pub use node::{dispatch_click, to_document, to_html, ClickAction, VisualNode};
pub use renderer::{render_component, sketch_rotation, RenderContext, ThemePalette};
pub use schema::{response_schema, validation_schema, SchemaValidator};
pub use selection::{InspectorTab, Selection, SelectionState};
pub use suggestions::{suggest, StyleSuggestions};
pub use tool::WireframeTool;
pub use validator::{decode_layout, LayoutValidator, ValidationReport};
