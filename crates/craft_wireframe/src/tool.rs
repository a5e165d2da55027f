//! Wireframe tool session.
//!
//! Owns everything one wireframe tab holds: the prompt, the busy flag, the
//! current layout, selection, inspector tab, render style and the inline
//! error message.

use craft_genai::GenerationBackend;
use tracing::{debug, warn};

use crate::composer::render_preview;
use crate::error::{WireframeError, WireframeResult};
use crate::generator::{LayoutGenerator, EMPTY_PROMPT_ERROR};
use crate::inspector::{inspect, InspectorView};
use crate::models::{Layout, RenderStyle};
use crate::node::{dispatch_click, VisualNode};
use crate::selection::{InspectorTab, Selection, SelectionState};

pub struct WireframeTool<B> {
    generator: LayoutGenerator<B>,
    prompt: String,
    layout: Option<Layout>,
    state: SelectionState,
    render_style: RenderStyle,
    error: Option<String>,
    busy: bool,
}

impl<B: GenerationBackend> WireframeTool<B> {
    pub fn new(generator: LayoutGenerator<B>) -> Self {
        Self {
            generator,
            prompt: String::new(),
            layout: None,
            state: SelectionState::default(),
            render_style: RenderStyle::default(),
            error: None,
            busy: false,
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn selection(&self) -> Selection {
        self.state.selection()
    }

    pub fn tab(&self) -> InspectorTab {
        self.state.tab()
    }

    pub fn render_style(&self) -> RenderStyle {
        self.render_style
    }

    /// Inline error from the last action, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a generation request is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Run one generation for the current prompt.
    ///
    /// On failure the error is kept for display and the previous layout and
    /// selection stay as they were.
    pub async fn generate(&mut self) -> WireframeResult<()> {
        let prompt = self.begin_generation()?;
        let result = self.generator.generate_layout(&prompt).await;
        self.finish_generation(result)
    }

    /// Mark a request as started and return the prompt to send.
    ///
    /// Fails with [`WireframeError::Busy`] while another request is pending
    /// and with [`WireframeError::Input`] for a blank prompt.
    pub fn begin_generation(&mut self) -> WireframeResult<String> {
        if self.busy {
            return Err(WireframeError::Busy);
        }
        if self.prompt.trim().is_empty() {
            self.error = Some(EMPTY_PROMPT_ERROR.to_string());
            return Err(WireframeError::Input(EMPTY_PROMPT_ERROR.to_string()));
        }
        self.error = None;
        self.busy = true;
        Ok(self.prompt.clone())
    }

    /// Settle the pending request with its outcome.
    pub fn finish_generation(&mut self, result: WireframeResult<Layout>) -> WireframeResult<()> {
        self.busy = false;
        match result {
            Ok(layout) => {
                self.load(layout);
                Ok(())
            }
            Err(err) => {
                warn!("Wireframe generation failed: {}", err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Replace the current layout, resetting selection and tab.
    pub fn load(&mut self, layout: Layout) {
        debug!("Loaded layout with {} components", layout.len());
        self.state.reset(layout.len());
        self.layout = Some(layout);
        self.error = None;
    }

    pub fn set_tab(&mut self, tab: InspectorTab) {
        self.state.set_tab(tab);
    }

    pub fn set_render_style(&mut self, style: RenderStyle) {
        self.render_style = style;
    }

    /// The interactive preview of the current layout.
    pub fn preview(&self) -> Option<VisualNode> {
        self.layout
            .as_ref()
            .map(|layout| render_preview(layout, self.render_style, self.state.selection().index()))
    }

    /// Click the preview node at `path` and return the resulting selection.
    pub fn click(&mut self, path: &[usize]) -> Selection {
        if let Some(preview) = self.preview() {
            for action in dispatch_click(&preview, path) {
                self.state.apply(action);
            }
        }
        self.state.selection()
    }

    /// Click the node rendering component `index`.
    pub fn click_component(&mut self, index: usize) -> Selection {
        match self.preview().and_then(|p| p.path_to_component(index)) {
            Some(path) => self.click(&path),
            None => self.state.selection(),
        }
    }

    /// Click the preview background.
    pub fn click_background(&mut self) -> Selection {
        self.click(&[])
    }

    /// The active inspector panel, or `None` before the first layout.
    pub fn inspector(&self) -> WireframeResult<Option<InspectorView>> {
        self.layout
            .as_ref()
            .map(|layout| inspect(layout, self.state.selection(), self.state.tab()))
            .transpose()
    }

    /// Pretty-printed JSON of the current layout.
    pub fn export_json(&self) -> WireframeResult<Option<String>> {
        self.layout
            .as_ref()
            .map(|layout| serde_json::to_string_pretty(layout).map_err(WireframeError::from))
            .transpose()
    }
}
