//! Visual element tree produced by the renderer and composer.

use std::fmt::Write as _;

/// What a click on a node does to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Select the component at this index; stops propagation
    Select(usize),
    /// Clear the selection (preview background)
    Deselect,
}

/// One element of the preview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualNode {
    pub tag: &'static str,
    pub classes: Vec<String>,
    /// Inline CSS declarations in insertion order
    pub style: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<VisualNode>,
    /// Index of the layout component this node renders
    pub component_index: Option<usize>,
    pub on_click: Option<ClickAction>,
}

impl VisualNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    /// Append whitespace-separated classes, skipping empties.
    pub fn class(mut self, classes: impl AsRef<str>) -> Self {
        self.classes
            .extend(classes.as_ref().split_whitespace().map(str::to_string));
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.push((property.into(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: VisualNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = VisualNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn component(mut self, index: usize) -> Self {
        self.component_index = Some(index);
        self
    }

    pub fn on_click(mut self, action: ClickAction) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn class_string(&self) -> String {
        self.classes.join(" ")
    }

    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Component indices in document order.
    pub fn component_order(&self) -> Vec<usize> {
        let mut order = Vec::new();
        self.walk(&mut |node| {
            if let Some(index) = node.component_index {
                order.push(index);
            }
        });
        order
    }

    /// Child-index path from this node to the node rendering `index`.
    pub fn path_to_component(&self, index: usize) -> Option<Vec<usize>> {
        if self.component_index == Some(index) {
            return Some(Vec::new());
        }
        self.children.iter().enumerate().find_map(|(i, child)| {
            child.path_to_component(index).map(|mut path| {
                path.insert(0, i);
                path
            })
        })
    }

    /// Node reached by following `path` from this node.
    pub fn at_path(&self, path: &[usize]) -> Option<&VisualNode> {
        path.iter()
            .try_fold(self, |node, &i| node.children.get(i))
    }

    fn walk(&self, visit: &mut dyn FnMut(&VisualNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Deliver a click on the node at `path` (child indices from `root`).
///
/// The event bubbles from the target towards the root, firing each click
/// handler on the way. A `Select` handler stops propagation, so clicking a
/// component never also reaches the background. An invalid path fires
/// nothing.
pub fn dispatch_click(root: &VisualNode, path: &[usize]) -> Vec<ClickAction> {
    let mut chain = vec![root];
    let mut node = root;
    for &i in path {
        match node.children.get(i) {
            Some(child) => {
                chain.push(child);
                node = child;
            }
            None => return Vec::new(),
        }
    }

    let mut fired = Vec::new();
    for node in chain.into_iter().rev() {
        if let Some(action) = node.on_click {
            fired.push(action);
            if matches!(action, ClickAction::Select(_)) {
                break;
            }
        }
    }
    fired
}

/// Serialise a node tree as HTML.
pub fn to_html(node: &VisualNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

/// Standalone HTML page around a preview, styled with the Tailwind CDN build.
pub fn to_document(title: &str, node: &VisualNode) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n<script src=\"https://cdn.tailwindcss.com\"></script>\n</head>\n<body class=\"bg-gray-900 p-8\">\n{}</body>\n</html>\n",
        escape(title),
        to_html(node)
    )
}

fn write_node(out: &mut String, node: &VisualNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{}<{}", indent, node.tag);
    if !node.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape(&node.class_string()));
    }
    if !node.style.is_empty() {
        let css = node
            .style
            .iter()
            .map(|(p, v)| format!("{}: {}", p, v))
            .collect::<Vec<_>>()
            .join("; ");
        let _ = write!(out, " style=\"{}\"", escape(&css));
    }
    if let Some(index) = node.component_index {
        let _ = write!(out, " data-index=\"{}\"", index);
    }
    match node.on_click {
        Some(ClickAction::Select(_)) => out.push_str(" data-action=\"select\""),
        Some(ClickAction::Deselect) => out.push_str(" data-action=\"deselect\""),
        None => {}
    }
    out.push('>');

    if node.children.is_empty() {
        if let Some(text) = &node.text {
            out.push_str(&escape(text));
        }
    } else {
        out.push('\n');
        if let Some(text) = &node.text {
            let _ = writeln!(out, "{}  {}", indent, escape(text));
        }
        for child in &node.children {
            write_node(out, child, depth + 1);
        }
        out.push_str(&indent);
    }
    let _ = writeln!(out, "</{}>", node.tag);
}

/// Escape text for HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
