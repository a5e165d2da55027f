//! Style suggestion engine.
//!
//! A fixed lookup table from component kind and theme to recommended utility
//! classes and CSS declarations. Only a few shadow and background values vary
//! with the theme.

use serde::Serialize;

use crate::models::{ComponentKind, Theme};

/// Curated refinements for one component kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSuggestions {
    pub class_suggestions: Vec<String>,
    pub css_suggestions: Vec<String>,
}

impl StyleSuggestions {
    fn new(classes: &[&str], css: &[String]) -> Self {
        Self {
            class_suggestions: classes.iter().map(|c| c.to_string()).collect(),
            css_suggestions: css.to_vec(),
        }
    }
}

/// Suggestions for `kind` under `theme`, or `None` for kinds without an entry.
pub fn suggest(kind: &ComponentKind, theme: Theme) -> Option<StyleSuggestions> {
    let dark = theme == Theme::Dark;
    let pick = |dark_value: &'static str, light_value: &'static str| {
        if dark {
            dark_value
        } else {
            light_value
        }
    };

    let suggestions = match kind {
        ComponentKind::Header => StyleSuggestions::new(
            &[
                "text-transparent bg-clip-text bg-gradient-to-r from-purple-400 to-pink-600",
                "tracking-tight pb-2 border-b-2 border-purple-500/50",
                "font-extrabold",
            ],
            &[format!(
                "text-shadow: 1px 1px 3px {};",
                pick("rgba(0, 0, 0, 0.5)", "rgba(0, 0, 0, 0.2)")
            )],
        ),
        ComponentKind::Button => StyleSuggestions::new(
            &[
                "transition-transform transform hover:scale-105",
                "shadow-lg hover:shadow-purple-500/50",
                "rounded-full px-8 py-3",
                "flex items-center justify-center space-x-2",
            ],
            &[
                "background: linear-gradient(45deg, #8B5CF6, #EC4899);".to_string(),
                format!(
                    "box-shadow: 0 4px 14px 0 {};",
                    pick("rgba(192, 132, 252, 0.39)", "rgba(0, 0, 0, 0.2)")
                ),
            ],
        ),
        ComponentKind::Input => StyleSuggestions::new(
            &[
                "focus:ring-2 focus:ring-purple-500 focus:border-transparent",
                "transition duration-300 ease-in-out",
                pick("shadow-inner bg-gray-800", "shadow-inner bg-gray-50"),
            ],
            &[
                "caret-color: #8B5CF6;".to_string(),
                format!(
                    "box-shadow: inset 0 2px 4px 0 {};",
                    pick("rgba(0,0,0,0.5)", "rgba(0,0,0,0.06)")
                ),
            ],
        ),
        ComponentKind::Card => {
            let mut classes = vec![
                "hover:shadow-2xl hover:-translate-y-1 transition-all duration-300",
                "border-l-4 border-purple-500",
                "rounded-xl",
            ];
            if dark {
                classes.push("backdrop-blur-sm bg-white/5");
            }
            StyleSuggestions::new(
                &classes,
                &[format!(
                    "box-shadow: {};",
                    pick(
                        "0 10px 15px -3px rgba(0, 0, 0, 0.3), 0 4px 6px -2px rgba(0, 0, 0, 0.2)",
                        "0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -2px rgba(0, 0, 0, 0.05)"
                    )
                )],
            )
        }
        ComponentKind::ImagePlaceholder => StyleSuggestions::new(
            &["rounded-xl overflow-hidden", "border-purple-500/50", "bg-cover bg-center"],
            &["background-image: url('https://source.unsplash.com/random/400x300?abstract');"
                .to_string()],
        ),
        ComponentKind::TextBlock | ComponentKind::Spacer | ComponentKind::Unknown(_) => {
            return None
        }
    };
    Some(suggestions)
}
