//! Component renderer.
//!
//! Maps one layout component to a [`VisualNode`]. Rendering is pure: the same
//! component, index, context and selection flag always give the same node.

use crate::models::{
    Alignment, ColorRole, Component, ComponentKind, ComponentStyle, FontSize, FontWeight,
    LayoutMode, Position, Properties, RenderStyle, Size, Spacing, Theme, Variant,
};
use crate::node::{ClickAction, VisualNode};

/// Utility classes for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub bg: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub input_bg: &'static str,
    pub placeholder: &'static str,
    pub card_bg: &'static str,
}

impl ThemePalette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                bg: "bg-white",
                text: "text-gray-800",
                text_secondary: "text-gray-500",
                border: "border-gray-300",
                input_bg: "bg-gray-100",
                placeholder: "text-gray-400",
                card_bg: "bg-white",
            },
            Theme::Dark => Self {
                bg: "bg-gray-900/70",
                text: "text-white",
                text_secondary: "text-gray-300",
                border: "border-gray-700",
                input_bg: "bg-gray-700",
                placeholder: "text-gray-400",
                card_bg: "bg-gray-800",
            },
        }
    }
}

/// Rotation classes cycled through by the sketch style.
pub const SKETCH_ROTATIONS: [&str; 4] = ["-rotate-1", "rotate-1", "-rotate-2", "rotate-2"];

/// Rotation for the component at `index`; reproducible per index.
pub fn sketch_rotation(index: usize) -> &'static str {
    SKETCH_ROTATIONS[index % SKETCH_ROTATIONS.len()]
}

/// Height class of a spacer.
pub fn spacer_height(size: Option<Size>) -> &'static str {
    match size.unwrap_or(Size::Medium) {
        Size::Small => "h-4",
        Size::Medium => "h-8",
        Size::Large => "h-16",
    }
}

pub const DEFAULT_HEADER_TEXT: &str = "Header";
pub const DEFAULT_TEXT_BLOCK: &str = "Lorem ipsum dolor sit amet...";
pub const DEFAULT_INPUT_PLACEHOLDER: &str = "Input Field";
pub const DEFAULT_BUTTON_TEXT: &str = "Button";
pub const DEFAULT_CARD_TEXT: &str = "Card Component";

/// Settings shared by every component of one preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub theme: Theme,
    pub spacing: Spacing,
    pub layout: LayoutMode,
    pub style: RenderStyle,
}

impl RenderContext {
    pub fn new(theme: Theme, spacing: Spacing, layout: LayoutMode, style: RenderStyle) -> Self {
        Self {
            theme,
            spacing,
            layout,
            style,
        }
    }

    pub fn palette(&self) -> ThemePalette {
        ThemePalette::for_theme(self.theme)
    }
}

/// Render one component.
pub fn render_component(
    component: &Component,
    index: usize,
    ctx: &RenderContext,
    is_selected: bool,
) -> VisualNode {
    match ctx.style {
        RenderStyle::Clean => render_clean(component, index, ctx, is_selected),
        RenderStyle::Sketch => render_sketch(component, index, ctx, is_selected),
    }
}

/// Apply the percentage box when the layout is absolute.
///
/// A component without `position` under an absolute layout gets no box and
/// falls back to the container origin.
fn place(node: VisualNode, position: Option<&Position>, layout: LayoutMode) -> VisualNode {
    match (layout, position) {
        (LayoutMode::Absolute, Some(p)) => node
            .style("position", "absolute")
            .style("top", percent(p.top))
            .style("left", percent(p.left))
            .style("width", percent(p.width))
            .style("height", percent(p.height)),
        _ => node,
    }
}

fn percent(value: f64) -> String {
    format!("{}%", value)
}

fn apply_overrides(mut node: VisualNode, style: Option<&ComponentStyle>) -> VisualNode {
    if let Some(style) = style {
        if let Some(radius) = style.border_radius.as_deref().filter(|r| !r.is_empty()) {
            node = node.style("border-radius", radius);
        }
        if let Some(shadow) = style.box_shadow.as_deref().filter(|s| !s.is_empty()) {
            node = node.style("box-shadow", shadow);
        }
        if let Some(opacity) = style.opacity {
            node = node.style("opacity", opacity.to_string());
        }
    }
    node
}

fn unknown_node(kind: &ComponentKind, index: usize) -> VisualNode {
    VisualNode::new("div")
        .class("text-red-400")
        .component(index)
        .text(format!("Unknown component type: {}", kind))
}

fn color_class(color: Option<ColorRole>, palette: &ThemePalette) -> &'static str {
    match color {
        Some(ColorRole::Primary) | Some(ColorRole::Accent) => "text-purple-400",
        Some(ColorRole::Secondary) => palette.text_secondary,
        Some(ColorRole::Danger) => "text-red-500",
        Some(ColorRole::Default) | None => palette.text,
    }
}

fn text_classes(props: &Properties, palette: &ThemePalette) -> String {
    let alignment = match props.alignment.unwrap_or(Alignment::Left) {
        Alignment::Left => "text-left",
        Alignment::Center => "text-center",
        Alignment::Right => "text-right",
    };
    let weight = match props.font_weight.unwrap_or(FontWeight::Normal) {
        FontWeight::Normal => "font-normal",
        FontWeight::Bold => "font-bold",
    };
    let size = match props.font_size.unwrap_or(FontSize::Medium) {
        FontSize::Small => "text-sm",
        FontSize::Medium => "text-base",
        FontSize::Large => "text-lg",
    };
    format!("{} {} {} {}", alignment, weight, size, color_class(props.color, palette))
}

fn button_classes(props: &Properties, theme: Theme) -> String {
    if let Some(bg) = props.background_color() {
        return format!("{} text-white", bg);
    }
    match props.variant.unwrap_or(Variant::Primary) {
        Variant::Primary => "bg-purple-600 hover:bg-purple-700 text-white".to_string(),
        Variant::Secondary => match theme {
            Theme::Dark => "bg-gray-600 hover:bg-gray-500 text-white".to_string(),
            Theme::Light => "bg-gray-200 hover:bg-gray-300 text-gray-800".to_string(),
        },
        Variant::Outline => {
            "bg-transparent border border-purple-500 text-purple-500 hover:bg-purple-500/10"
                .to_string()
        }
    }
}

fn render_clean(
    component: &Component,
    index: usize,
    ctx: &RenderContext,
    is_selected: bool,
) -> VisualNode {
    let props = &component.properties;
    let palette = ctx.palette();

    if let ComponentKind::Unknown(_) = component.kind {
        let node = place(unknown_node(&component.kind, index), component.position.as_ref(), ctx.layout);
        return apply_overrides(node, component.style.as_ref());
    }

    let emphasis = if is_selected {
        let lift = if ctx.layout == LayoutMode::Absolute {
            ""
        } else {
            " hover:-translate-y-1"
        };
        format!("ring-2 ring-purple-500 shadow-xl hover:scale-[1.02] hover:shadow-2xl{}", lift)
    } else {
        "hover:scale-105 hover:shadow-lg".to_string()
    };

    let tag = match component.kind {
        ComponentKind::Header => "h2",
        ComponentKind::TextBlock => "p",
        _ => "div",
    };
    let node = VisualNode::new(tag)
        .class("transition-all duration-200 w-full cursor-pointer transform")
        .class(emphasis)
        .component(index)
        .on_click(ClickAction::Select(index));

    let node = match &component.kind {
        ComponentKind::Header => node
            .class("text-2xl font-bold rounded-md p-1")
            .class(text_classes(props, &palette))
            .text(props.text_or(DEFAULT_HEADER_TEXT)),
        ComponentKind::TextBlock => node
            .class("rounded-md p-1")
            .class(text_classes(props, &palette))
            .text(props.text_or(DEFAULT_TEXT_BLOCK)),
        ComponentKind::Input => node
            .class(format!(
                "p-3 {} {} border rounded-lg {}",
                palette.input_bg, palette.border, palette.placeholder
            ))
            .text(props.placeholder_or(DEFAULT_INPUT_PLACEHOLDER)),
        ComponentKind::Button => node
            .class("p-3 rounded-lg text-center font-semibold")
            .class(button_classes(props, ctx.theme))
            .text(props.text_or(DEFAULT_BUTTON_TEXT)),
        ComponentKind::ImagePlaceholder => node
            .class(format!(
                "h-32 {} border-2 border-dashed {} rounded-lg flex items-center justify-center {}",
                palette.input_bg, palette.border, palette.placeholder
            ))
            .text("Image Placeholder"),
        ComponentKind::Card => node
            .class(format!(
                "p-4 {} border {} rounded-lg",
                props.background_color().unwrap_or(palette.card_bg),
                palette.border
            ))
            .child(
                VisualNode::new("p")
                    .class(palette.text_secondary)
                    .text(props.text_or(DEFAULT_CARD_TEXT)),
            ),
        ComponentKind::Spacer => node.class(format!(
            "{} w-full border-2 border-dashed border-transparent hover:border-gray-600 rounded-md",
            spacer_height(props.size)
        )),
        ComponentKind::Unknown(_) => node,
    };

    let node = place(node, component.position.as_ref(), ctx.layout);
    apply_overrides(node, component.style.as_ref())
}

fn render_sketch(
    component: &Component,
    index: usize,
    ctx: &RenderContext,
    is_selected: bool,
) -> VisualNode {
    let props = &component.properties;

    if let ComponentKind::Unknown(_) = component.kind {
        return place(unknown_node(&component.kind, index), component.position.as_ref(), ctx.layout);
    }

    let tag = match component.kind {
        ComponentKind::Header => "h2",
        ComponentKind::TextBlock => "p",
        _ => "div",
    };
    let mut node = VisualNode::new(tag)
        .class("transition-transform duration-100 cursor-pointer border-2 border-gray-600 dark:border-gray-400 transform hover:scale-105")
        .class(sketch_rotation(index))
        .component(index)
        .on_click(ClickAction::Select(index));
    if is_selected {
        node = node.class("ring-2 ring-purple-500 shadow-xl");
    }

    let node = match &component.kind {
        ComponentKind::Header => node
            .class("p-2 text-2xl font-bold")
            .text(props.text_or(DEFAULT_HEADER_TEXT)),
        ComponentKind::TextBlock => node.class("p-2").text(props.text_or(DEFAULT_TEXT_BLOCK)),
        ComponentKind::Input => node
            .class("p-3 text-gray-500")
            .text(props.placeholder_or(DEFAULT_INPUT_PLACEHOLDER)),
        ComponentKind::Button => node
            .class("p-3 text-center font-semibold bg-gray-300 dark:bg-gray-700 shadow-[2px_2px_0px_currentColor] hover:shadow-[1px_1px_0px_currentColor] active:shadow-none active:translate-x-px active:translate-y-px")
            .text(props.text_or(DEFAULT_BUTTON_TEXT)),
        ComponentKind::ImagePlaceholder => node
            .class("h-32 flex items-center justify-center text-gray-500 dark:text-gray-400 relative overflow-hidden")
            .text("Image")
            .child(VisualNode::new("div").class("absolute w-[150%] h-0.5 bg-current transform rotate-45"))
            .child(VisualNode::new("div").class("absolute w-[150%] h-0.5 bg-current transform -rotate-45")),
        ComponentKind::Card => node
            .class("p-4")
            .child(VisualNode::new("p").text(props.text_or(DEFAULT_CARD_TEXT))),
        ComponentKind::Spacer => node.class(format!(
            "{} w-full !border-transparent !shadow-none hover:bg-gray-500/10",
            spacer_height(props.size)
        )),
        ComponentKind::Unknown(_) => node,
    };

    // Sketch mode honours the box but not the free-form style overrides.
    place(node, component.position.as_ref(), ctx.layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(style: RenderStyle, layout: LayoutMode) -> RenderContext {
        RenderContext::new(Theme::Dark, Spacing::Normal, layout, style)
    }

    #[test]
    fn test_header_defaults() {
        let header = Component::new(ComponentKind::Header, Properties::default());
        let node = render_component(&header, 0, &ctx(RenderStyle::Clean, LayoutMode::SingleColumn), false);
        assert_eq!(node.tag, "h2");
        assert_eq!(node.text.as_deref(), Some("Header"));
        assert!(node.has_class("text-left"));
        assert!(node.has_class("font-normal"));
        assert!(node.has_class("text-base"));
        assert!(node.has_class("text-white"));
        assert_eq!(node.on_click, Some(ClickAction::Select(0)));
    }

    #[test]
    fn test_color_roles() {
        let palette = ThemePalette::for_theme(Theme::Light);
        assert_eq!(color_class(Some(ColorRole::Accent), &palette), "text-purple-400");
        assert_eq!(color_class(Some(ColorRole::Primary), &palette), "text-purple-400");
        assert_eq!(color_class(Some(ColorRole::Secondary), &palette), "text-gray-500");
        assert_eq!(color_class(Some(ColorRole::Danger), &palette), "text-red-500");
        assert_eq!(color_class(None, &palette), "text-gray-800");
    }

    #[test]
    fn test_spacer_heights() {
        assert_eq!(spacer_height(Some(Size::Small)), "h-4");
        assert_eq!(spacer_height(None), "h-8");
        assert_eq!(spacer_height(Some(Size::Large)), "h-16");
    }

    #[test]
    fn test_button_variants() {
        let mut props = Properties::default();
        assert!(button_classes(&props, Theme::Dark).starts_with("bg-purple-600"));

        props.variant = Some(Variant::Secondary);
        assert!(button_classes(&props, Theme::Light).starts_with("bg-gray-200"));
        assert!(button_classes(&props, Theme::Dark).starts_with("bg-gray-600"));

        props.variant = Some(Variant::Outline);
        assert!(button_classes(&props, Theme::Dark).starts_with("bg-transparent"));

        props.background_color = Some("bg-green-500".to_string());
        assert_eq!(button_classes(&props, Theme::Dark), "bg-green-500 text-white");
    }

    #[test]
    fn test_selection_changes_emphasis_only() {
        let button = Component::new(ComponentKind::Button, Properties::with_text("Go"));
        let c = ctx(RenderStyle::Clean, LayoutMode::SingleColumn);
        let plain = render_component(&button, 3, &c, false);
        let selected = render_component(&button, 3, &c, true);

        assert_eq!(plain.text, selected.text);
        assert!(!plain.has_class("ring-2"));
        assert!(selected.has_class("ring-2"));
        assert!(selected.has_class("hover:-translate-y-1"));

        let absolute = render_component(&button, 3, &ctx(RenderStyle::Clean, LayoutMode::Absolute), true);
        assert!(!absolute.has_class("hover:-translate-y-1"));
    }

    #[test]
    fn test_sketch_rotation_cycles() {
        let card = Component::new(ComponentKind::Card, Properties::default());
        let c = ctx(RenderStyle::Sketch, LayoutMode::SingleColumn);
        for index in 0..8 {
            let node = render_component(&card, index, &c, false);
            assert!(node.has_class(SKETCH_ROTATIONS[index % 4]));
            assert_eq!(node, render_component(&card, index, &c, false));
        }
        assert_eq!(sketch_rotation(5), "rotate-1");
    }

    #[test]
    fn test_absolute_position_and_overrides() {
        let card = Component::new(ComponentKind::Card, Properties::default())
            .at(Position::new(5.0, 10.0, 50.0, 25.5))
            .styled(ComponentStyle {
                border_radius: Some("12px".to_string()),
                box_shadow: None,
                opacity: Some(0.8),
            });

        let node = render_component(&card, 0, &ctx(RenderStyle::Clean, LayoutMode::Absolute), false);
        assert_eq!(node.style_value("position"), Some("absolute"));
        assert_eq!(node.style_value("top"), Some("5%"));
        assert_eq!(node.style_value("height"), Some("25.5%"));
        assert_eq!(node.style_value("border-radius"), Some("12px"));
        assert_eq!(node.style_value("opacity"), Some("0.8"));

        // Position is ignored outside the absolute layout
        let flow = render_component(&card, 0, &ctx(RenderStyle::Clean, LayoutMode::Grid2x2), false);
        assert_eq!(flow.style_value("top"), None);
        assert_eq!(flow.style_value("border-radius"), Some("12px"));

        let sketch = render_component(&card, 0, &ctx(RenderStyle::Sketch, LayoutMode::Absolute), false);
        assert_eq!(sketch.style_value("left"), Some("10%"));
        assert_eq!(sketch.style_value("border-radius"), None);
    }

    #[test]
    fn test_missing_position_under_absolute_has_no_box() {
        let header = Component::new(ComponentKind::Header, Properties::default());
        let node = render_component(&header, 0, &ctx(RenderStyle::Clean, LayoutMode::Absolute), false);
        assert!(node.style.is_empty());
    }

    #[test]
    fn test_unknown_kind_renders_fallback() {
        let odd = Component::new("carousel", Properties::with_text("slides"));
        for style in [RenderStyle::Clean, RenderStyle::Sketch] {
            let node = render_component(&odd, 4, &ctx(style, LayoutMode::SingleColumn), true);
            assert_eq!(node.text.as_deref(), Some("Unknown component type: carousel"));
            assert!(node.has_class("text-red-400"));
            assert_eq!(node.component_index, Some(4));
            assert_eq!(node.on_click, None);
        }
    }
}
