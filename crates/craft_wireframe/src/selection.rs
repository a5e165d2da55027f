//! Selection and inspector-tab state.

use std::fmt;

use tracing::debug;

use crate::node::ClickAction;

/// Which component of the current layout is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(usize),
}

impl Selection {
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Selected(index) => Some(*index),
        }
    }
}

/// Panel shown next to the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InspectorTab {
    #[default]
    Properties,
    Suggestions,
    Json,
}

impl InspectorTab {
    pub const ALL: [InspectorTab; 3] = [Self::Properties, Self::Suggestions, Self::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Suggestions => "suggestions",
            Self::Json => "json",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }

    /// Caption of the tab button.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Properties => "Properties",
            Self::Suggestions => "Suggestions",
            Self::Json => "JSON Output",
        }
    }
}

impl fmt::Display for InspectorTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection plus inspector tab for one layout.
///
/// The selection only ever holds an index below `component_count`; both
/// fields go back to their defaults when a new layout is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selection: Selection,
    tab: InspectorTab,
    component_count: usize,
}

impl SelectionState {
    pub fn new(component_count: usize) -> Self {
        Self {
            component_count,
            ..Self::default()
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn tab(&self) -> InspectorTab {
        self.tab
    }

    /// Start over for a freshly generated layout.
    pub fn reset(&mut self, component_count: usize) {
        *self = Self::new(component_count);
    }

    /// Apply one fired click action. Out-of-range indices are ignored.
    pub fn apply(&mut self, action: ClickAction) {
        match action {
            ClickAction::Select(index) if index < self.component_count => {
                debug!("Selected component {}", index);
                self.selection = Selection::Selected(index);
            }
            ClickAction::Select(index) => {
                debug!(
                    "Ignoring selection of component {} (layout has {})",
                    index, self.component_count
                );
            }
            ClickAction::Deselect => self.selection = Selection::None,
        }
    }

    /// Selection does not touch the tab and vice versa.
    pub fn set_tab(&mut self, tab: InspectorTab) {
        self.tab = tab;
    }
}
