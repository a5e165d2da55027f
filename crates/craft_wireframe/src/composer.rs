//! Layout composer.
//!
//! Arranges rendered components into the container for the layout mode and
//! wraps the result in the preview frame.

use crate::models::{Layout, LayoutMode, RenderStyle, Spacing};
use crate::node::{ClickAction, VisualNode};
use crate::renderer::{render_component, RenderContext, ThemePalette};

/// Gap class for flow layouts.
pub fn gap_class(spacing: Spacing) -> &'static str {
    match spacing {
        Spacing::Compact => "gap-2",
        Spacing::Normal => "gap-4",
        Spacing::Loose => "gap-8",
    }
}

/// Number of components placed in the sidebar column: `ceil(n / 3)`.
pub fn sidebar_count(n: usize) -> usize {
    (n + 2) / 3
}

/// Arrange already-rendered components for `layout`.
///
/// `rendered[i]` must be the node for `layout.components[i]`. Order inside
/// each column follows the component order.
pub fn compose(layout: &Layout, rendered: Vec<VisualNode>) -> VisualNode {
    let gap = gap_class(layout.spacing);
    match layout.layout {
        LayoutMode::SingleColumn => VisualNode::new("div")
            .class(format!("flex flex-col {}", gap))
            .children(rendered),
        LayoutMode::Grid2x2 => VisualNode::new("div")
            .class(format!("grid md:grid-cols-2 {}", gap))
            .children(rendered),
        LayoutMode::Absolute => VisualNode::new("div")
            .class("relative h-[600px] w-full")
            .children(rendered),
        LayoutMode::SidebarLeft | LayoutMode::SidebarRight => {
            let n = rendered.len();
            let side = sidebar_count(n);
            let sidebar_first = layout.layout == LayoutMode::SidebarLeft;

            let mut rendered = rendered;
            let split = if sidebar_first { side } else { n - side };
            let tail = rendered.split_off(split);
            let (sidebar, main) = if sidebar_first {
                (rendered, tail)
            } else {
                (tail, rendered)
            };

            let sidebar = VisualNode::new("div")
                .class(format!("md:col-span-1 flex flex-col {}", gap))
                .children(sidebar);
            let main = VisualNode::new("div")
                .class(format!("md:col-span-2 flex flex-col {}", gap))
                .children(main);

            let container = VisualNode::new("div").class(format!("grid md:grid-cols-3 {}", gap));
            if sidebar_first {
                container.child(sidebar).child(main)
            } else {
                container.child(main).child(sidebar)
            }
        }
    }
}

/// Render the full preview: frame, title and arranged components.
///
/// The frame carries the background click handler, so a click that reaches
/// it without being claimed by a component clears the selection.
pub fn render_preview(layout: &Layout, style: RenderStyle, selected: Option<usize>) -> VisualNode {
    let ctx = RenderContext::new(layout.theme, layout.spacing, layout.layout, style);
    let rendered: Vec<VisualNode> = layout
        .components
        .iter()
        .enumerate()
        .map(|(index, component)| render_component(component, index, &ctx, selected == Some(index)))
        .collect();

    let palette = ThemePalette::for_theme(layout.theme);
    let frame = match style {
        RenderStyle::Sketch => VisualNode::new("div")
            .class("p-4 border border-gray-400 bg-amber-50 dark:bg-[#282a2d] rounded-lg")
            .class("font-sketch text-gray-800 dark:text-gray-200"),
        RenderStyle::Clean => VisualNode::new("div").class(format!(
            "p-4 border {} {} rounded-lg",
            palette.border, palette.bg
        )),
    };

    frame
        .on_click(ClickAction::Deselect)
        .child(
            VisualNode::new("h3")
                .class("text-lg font-semibold mb-4 text-purple-400")
                .text(layout.screen_title.clone()),
        )
        .child(compose(layout, rendered))
}
