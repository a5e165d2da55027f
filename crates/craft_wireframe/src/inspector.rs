//! Inspector panels shown next to the preview.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::WireframeResult;
use crate::models::{capitalize, Component, Layout};
use crate::selection::{InspectorTab, Selection};
use crate::suggestions::{suggest, StyleSuggestions};

pub const NO_SELECTION_PROPERTIES: &str = "Click an element in the preview to inspect its properties.";
pub const NO_SELECTION_SUGGESTIONS: &str =
    "Select a component in the preview to get style refinement suggestions.";
pub const NO_SUGGESTIONS: &str = "No specific suggestions for this component type.";

/// One `label: value` line of the properties panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub label: String,
    pub value: String,
}

/// Titled group of rows; groups without rows are never built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyGroup {
    pub title: &'static str,
    pub rows: Vec<PropertyRow>,
}

/// Content of the active inspector tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectorView {
    /// Nothing selected; carries the prompt for the active tab
    Empty(&'static str),
    Properties {
        kind: String,
        groups: Vec<PropertyGroup>,
    },
    Suggestions {
        kind: String,
        suggestions: StyleSuggestions,
    },
    NoSuggestions,
    Json(String),
}

/// Turn a camelCase key into a capitalised label: `fontWeight` -> `Font Weight`.
pub fn humanize(key: &str) -> String {
    static UPPER: OnceLock<Regex> = OnceLock::new();
    let upper = UPPER.get_or_init(|| Regex::new(r"([A-Z])").expect("valid label pattern"));
    upper
        .replace_all(key, " $1")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn group(title: &'static str, entries: Vec<(&str, Option<String>)>) -> Option<PropertyGroup> {
    let rows: Vec<PropertyRow> = entries
        .into_iter()
        .filter_map(|(key, value)| {
            value.filter(|v| !v.is_empty()).map(|value| PropertyRow {
                label: humanize(key),
                value,
            })
        })
        .collect();
    if rows.is_empty() {
        None
    } else {
        Some(PropertyGroup { title, rows })
    }
}

/// Non-empty property groups of a component, in Properties, Position, Style order.
pub fn property_groups(component: &Component) -> Vec<PropertyGroup> {
    let p = &component.properties;
    let string = |v: Option<&String>| v.cloned();
    let word = |v: Option<&'static str>| v.map(str::to_string);

    let mut groups = Vec::new();
    groups.extend(group(
        "Properties",
        vec![
            ("text", string(p.text.as_ref())),
            ("placeholder", string(p.placeholder.as_ref())),
            ("variant", word(p.variant.map(|v| v.as_str()))),
            ("size", word(p.size.map(|v| v.as_str()))),
            ("color", word(p.color.map(|v| v.as_str()))),
            ("backgroundColor", string(p.background_color.as_ref())),
            ("alignment", word(p.alignment.map(|v| v.as_str()))),
            ("fontWeight", word(p.font_weight.map(|v| v.as_str()))),
            ("fontSize", word(p.font_size.map(|v| v.as_str()))),
        ],
    ));
    if let Some(pos) = &component.position {
        groups.extend(group(
            "Position",
            vec![
                ("top", Some(pos.top.to_string())),
                ("left", Some(pos.left.to_string())),
                ("width", Some(pos.width.to_string())),
                ("height", Some(pos.height.to_string())),
            ],
        ));
    }
    if let Some(style) = &component.style {
        groups.extend(group(
            "Style",
            vec![
                ("borderRadius", string(style.border_radius.as_ref())),
                ("boxShadow", string(style.box_shadow.as_ref())),
                ("opacity", style.opacity.map(|o| o.to_string())),
            ],
        ));
    }
    groups
}

/// Build the view for `tab` given the current selection.
pub fn inspect(layout: &Layout, selection: Selection, tab: InspectorTab) -> WireframeResult<InspectorView> {
    let selected = selection.index().and_then(|i| layout.get(i));

    let view = match (tab, selected) {
        (InspectorTab::Json, _) => InspectorView::Json(serde_json::to_string_pretty(layout)?),
        (InspectorTab::Properties, None) => InspectorView::Empty(NO_SELECTION_PROPERTIES),
        (InspectorTab::Suggestions, None) => InspectorView::Empty(NO_SELECTION_SUGGESTIONS),
        (InspectorTab::Properties, Some(component)) => InspectorView::Properties {
            kind: component.kind.label(),
            groups: property_groups(component),
        },
        (InspectorTab::Suggestions, Some(component)) => match suggest(&component.kind, layout.theme) {
            Some(suggestions) => InspectorView::Suggestions {
                kind: component.kind.label(),
                suggestions,
            },
            None => InspectorView::NoSuggestions,
        },
    };
    Ok(view)
}

impl fmt::Display for InspectorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(message) => writeln!(f, "{}", message),
            Self::NoSuggestions => writeln!(f, "{}", NO_SUGGESTIONS),
            Self::Json(json) => writeln!(f, "{}", json),
            Self::Properties { kind, groups } => {
                writeln!(f, "COMPONENT TYPE")?;
                writeln!(f, "{}", kind)?;
                for group in groups {
                    writeln!(f)?;
                    writeln!(f, "{}", group.title.to_uppercase())?;
                    for row in &group.rows {
                        writeln!(f, "  {:<18}{}", row.label, row.value)?;
                    }
                }
                Ok(())
            }
            Self::Suggestions { kind, suggestions } => {
                writeln!(f, "SUGGESTIONS FOR")?;
                writeln!(f, "{}", kind)?;
                writeln!(f)?;
                writeln!(f, "TAILWIND CSS CLASSES")?;
                for class in &suggestions.class_suggestions {
                    writeln!(f, "  {}", class)?;
                }
                writeln!(f)?;
                writeln!(f, "CSS STYLE PROPERTIES")?;
                for css in &suggestions.css_suggestions {
                    writeln!(f, "  {}", css)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ComponentKind, ComponentStyle, FontWeight, LayoutMode, Position, Properties, Theme,
    };

    fn layout() -> Layout {
        let mut props = Properties::with_text("Sign In");
        props.font_weight = Some(FontWeight::Bold);
        props.placeholder = Some(String::new());
        Layout::new("Login", LayoutMode::Absolute)
            .component(
                Component::new(ComponentKind::Button, props)
                    .at(Position::new(10.0, 20.0, 30.5, 40.0))
                    .styled(ComponentStyle::default()),
            )
            .component(Component::new(ComponentKind::TextBlock, Properties::default()))
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("fontWeight"), "Font Weight");
        assert_eq!(humanize("backgroundColor"), "Background Color");
        assert_eq!(humanize("text"), "Text");
    }

    #[test]
    fn test_empty_states() {
        let layout = layout();
        assert_eq!(
            inspect(&layout, Selection::None, InspectorTab::Properties).unwrap(),
            InspectorView::Empty(NO_SELECTION_PROPERTIES)
        );
        assert_eq!(
            inspect(&layout, Selection::None, InspectorTab::Suggestions).unwrap(),
            InspectorView::Empty(NO_SELECTION_SUGGESTIONS)
        );
        assert_eq!(
            inspect(&layout, Selection::Selected(1), InspectorTab::Suggestions).unwrap(),
            InspectorView::NoSuggestions
        );
    }

    #[test]
    fn test_property_groups_skip_empty_values() {
        let layout = layout();
        let groups = property_groups(&layout.components[0]);
        // Style has no set values, so only two groups remain
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "Properties");
        assert_eq!(
            groups[0].rows,
            vec![
                PropertyRow { label: "Text".into(), value: "Sign In".into() },
                PropertyRow { label: "Font Weight".into(), value: "bold".into() },
            ]
        );
        assert_eq!(groups[1].rows[2].value, "30.5");
        assert!(property_groups(&layout.components[1]).is_empty());
    }

    #[test]
    fn test_json_tab_ignores_selection() {
        let layout = layout();
        let view = inspect(&layout, Selection::None, InspectorTab::Json).unwrap();
        match view {
            InspectorView::Json(json) => {
                let parsed: Layout = serde_json::from_str(&json).unwrap();
                assert_eq!(parsed, layout);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn test_suggestions_view_uses_layout_theme() {
        let layout = layout().theme(Theme::Light);
        let view = inspect(&layout, Selection::Selected(0), InspectorTab::Suggestions).unwrap();
        let text = view.to_string();
        assert!(text.contains("Button"));
        assert!(text.contains("rgba(0, 0, 0, 0.2)"));
    }
}
