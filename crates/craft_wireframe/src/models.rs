//! Data model of a wireframe description.
//!
//! A [`Layout`] is created wholesale from one generation response and is
//! never edited afterwards; a new generation replaces it entirely. Its
//! components are identified only by their position in `components`.

use serde::{Deserialize, Serialize};

/// Declares a closed set of string values with its wire spelling.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire spelling of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.as_str() == s)
            }

            /// Every accepted wire spelling, in declaration order.
            pub fn wire_values() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum! {
    /// Overall colour theme of the screen.
    pub enum Theme { Light => "light", Dark => "dark" }
}

closed_enum! {
    /// Gap between components in flow layouts.
    pub enum Spacing { Compact => "compact", Normal => "normal", Loose => "loose" }
}

closed_enum! {
    /// How components are arranged on the screen.
    pub enum LayoutMode {
        SingleColumn => "single-column",
        SidebarLeft => "two-column-sidebar-left",
        SidebarRight => "two-column-sidebar-right",
        Grid2x2 => "grid-2x2",
        /// Every component placed by its own percentage box
        Absolute => "absolute",
    }
}

closed_enum! {
    pub enum Variant { Primary => "primary", Secondary => "secondary", Outline => "outline" }
}

closed_enum! {
    pub enum Size { Small => "small", Medium => "medium", Large => "large" }
}

closed_enum! {
    /// Semantic colour role of text.
    pub enum ColorRole {
        Primary => "primary",
        Secondary => "secondary",
        Accent => "accent",
        Danger => "danger",
        Default => "default",
    }
}

closed_enum! {
    pub enum Alignment { Left => "left", Center => "center", Right => "right" }
}

closed_enum! {
    pub enum FontWeight { Normal => "normal", Bold => "bold" }
}

closed_enum! {
    pub enum FontSize { Small => "small", Medium => "medium", Large => "large" }
}

closed_enum! {
    /// Visual treatment of the preview.
    pub enum RenderStyle {
        /// Production-like styling
        Clean => "clean",
        /// Hand-drawn look with slight per-component rotation
        Sketch => "sketch",
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::Clean
    }
}

/// Kind of a component.
///
/// Any string outside the closed set decodes to `Unknown` and renders as a
/// flagged fallback node instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    Header,
    TextBlock,
    Input,
    Button,
    ImagePlaceholder,
    Card,
    Spacer,
    Unknown(String),
}

impl ComponentKind {
    pub const KNOWN: [ComponentKind; 7] = [
        Self::Header,
        Self::TextBlock,
        Self::Input,
        Self::Button,
        Self::ImagePlaceholder,
        Self::Card,
        Self::Spacer,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Header => "header",
            Self::TextBlock => "text_block",
            Self::Input => "input",
            Self::Button => "button",
            Self::ImagePlaceholder => "image_placeholder",
            Self::Card => "card",
            Self::Spacer => "spacer",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Human-readable name, e.g. `Image Placeholder`.
    pub fn label(&self) -> String {
        self.as_str()
            .split('_')
            .filter(|w| !w.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl From<String> for ComponentKind {
    fn from(raw: String) -> Self {
        Self::KNOWN
            .iter()
            .find(|k| k.as_str() == raw)
            .cloned()
            .unwrap_or(Self::Unknown(raw))
    }
}

impl From<&str> for ComponentKind {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic attributes of a component.
///
/// Every field is optional; absent fields fall back to a per-kind default
/// when rendered (header text `Header`, spacer size `medium`, button
/// variant `primary`, and so on).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorRole>,
    /// Literal utility class, e.g. `bg-blue-500`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
}

impl Properties {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: Some(placeholder.into()),
            ..Self::default()
        }
    }

    /// Non-empty text, or `fallback`.
    pub fn text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty(self.text.as_deref()).unwrap_or(fallback)
    }

    /// Non-empty placeholder, or `fallback`.
    pub fn placeholder_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty(self.placeholder.as_deref()).unwrap_or(fallback)
    }

    pub fn background_color(&self) -> Option<&str> {
        non_empty(self.background_color.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Percentage box used by the absolute layout. All values are 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Position {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Whether every edge lies inside the 0-100 range.
    pub fn in_bounds(&self) -> bool {
        [self.top, self.left, self.width, self.height]
            .iter()
            .all(|v| (0.0..=100.0).contains(v))
    }
}

/// Additional visual overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// One entry of the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub properties: Properties,
    /// Only honoured under [`LayoutMode::Absolute`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ComponentStyle>,
}

impl Component {
    pub fn new(kind: impl Into<ComponentKind>, properties: Properties) -> Self {
        Self {
            kind: kind.into(),
            properties,
            position: None,
            style: None,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn styled(mut self, style: ComponentStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// Root of a wireframe description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub screen_title: String,
    pub theme: Theme,
    pub spacing: Spacing,
    pub layout: LayoutMode,
    /// Rendering and indexing order
    pub components: Vec<Component>,
}

impl Layout {
    pub fn new(screen_title: impl Into<String>, layout: LayoutMode) -> Self {
        Self {
            screen_title: screen_title.into(),
            theme: Theme::Dark,
            spacing: Spacing::Normal,
            layout,
            components: Vec::new(),
        }
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn get(&self, index: usize) -> Option<&Component> {
        self.components.get(index)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_round_trip_keeps_unknown_literal() {
        let kinds: Vec<ComponentKind> =
            serde_json::from_value(json!(["header", "image_placeholder", "carousel"])).unwrap();
        assert_eq!(kinds[0], ComponentKind::Header);
        assert_eq!(kinds[1], ComponentKind::ImagePlaceholder);
        assert_eq!(kinds[2], ComponentKind::Unknown("carousel".to_string()));
        assert!(!kinds[2].is_known());

        let back = serde_json::to_value(&kinds).unwrap();
        assert_eq!(back, json!(["header", "image_placeholder", "carousel"]));
    }

    #[test]
    fn test_kind_label() {
        assert_eq!(ComponentKind::TextBlock.label(), "Text Block");
        assert_eq!(ComponentKind::from("date_picker").label(), "Date Picker");
    }

    #[test]
    fn test_layout_mode_wire_names() {
        assert_eq!(LayoutMode::Grid2x2.as_str(), "grid-2x2");
        assert_eq!(
            serde_json::to_value(LayoutMode::SidebarRight).unwrap(),
            json!("two-column-sidebar-right")
        );
        assert_eq!(LayoutMode::parse("absolute"), Some(LayoutMode::Absolute));
        assert_eq!(LayoutMode::parse("three-column"), None);
    }

    #[test]
    fn test_properties_fallbacks() {
        let props = Properties {
            text: Some(String::new()),
            ..Properties::default()
        };
        assert_eq!(props.text_or("Header"), "Header");
        assert_eq!(Properties::with_text("Hi").text_or("Header"), "Hi");
        assert_eq!(Properties::default().placeholder_or("Input Field"), "Input Field");
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let component = Component::new(ComponentKind::Button, Properties::with_text("Go"));
        let value = serde_json::to_value(&component).unwrap();
        assert_eq!(value, json!({"type": "button", "properties": {"text": "Go"}}));
    }

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(0.0, 10.0, 100.0, 50.0).in_bounds());
        assert!(!Position::new(-1.0, 10.0, 100.0, 50.0).in_bounds());
        assert!(!Position::new(0.0, 10.0, 120.0, 50.0).in_bounds());
    }
}
