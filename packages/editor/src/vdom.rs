//! # Virtual DOM
//!
//! Render target for editable spans. Host frameworks (the browser bindings,
//! test harnesses) turn these nodes into real markup.

use copyedit_content::{format_number, ContentNode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn line_break() -> Self {
        VNode::element("br")
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            VNode::Text { .. } => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            VNode::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            VNode::Text { .. } => &[],
        }
    }

    pub fn is_line_break(&self) -> bool {
        self.tag() == Some("br")
    }

    /// Concatenated text of all descendant text nodes (like `textContent`)
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Element { children, .. } => children.iter().map(VNode::text_content).collect(),
        }
    }

    /// Visual lines: text split at `br` elements
    pub fn visual_lines(&self) -> Vec<String> {
        let mut lines = vec![String::new()];
        collect_lines(self, &mut lines);
        lines
    }
}

fn collect_lines(node: &VNode, lines: &mut Vec<String>) {
    match node {
        VNode::Text { content } => {
            if let Some(line) = lines.last_mut() {
                line.push_str(content);
            }
        }
        VNode::Element { .. } if node.is_line_break() => lines.push(String::new()),
        VNode::Element { children, .. } => {
            for child in children {
                collect_lines(child, lines);
            }
        }
    }
}

/// Render resolved text, inserting a `br` between `'\n'`-separated segments
pub fn render_lines(text: &str) -> Vec<VNode> {
    let mut nodes = Vec::new();

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            nodes.push(VNode::line_break());
        }
        if !line.is_empty() {
            nodes.push(VNode::text(line));
        }
    }

    nodes
}

/// Render an original content tree verbatim
pub fn render_content(node: &ContentNode) -> Vec<VNode> {
    match node {
        ContentNode::Text(text) => vec![VNode::text(text.as_str())],
        ContentNode::Number(n) => vec![VNode::text(format_number(*n))],
        ContentNode::LineBreak => vec![VNode::line_break()],
        ContentNode::Group(group) => {
            let children: Vec<VNode> = group.children.iter().flat_map(render_content).collect();
            match &group.element {
                Some(tag) => vec![VNode::element(tag.as_str()).with_children(children)],
                None => children,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lines_inserts_breaks() {
        let nodes = render_lines("Line one\nLine two");

        assert_eq!(
            nodes,
            vec![VNode::text("Line one"), VNode::line_break(), VNode::text("Line two")]
        );
    }

    #[test]
    fn test_render_lines_single_line() {
        assert_eq!(render_lines("Sell More"), vec![VNode::text("Sell More")]);
        assert!(render_lines("").is_empty());
    }

    #[test]
    fn test_render_content_keeps_elements() {
        let content = ContentNode::sequence([
            ContentNode::text("Sell "),
            ContentNode::element("strong", [ContentNode::text("More")]),
            ContentNode::line_break(),
            ContentNode::number(3),
        ]);

        let root = VNode::element("h1").with_children(render_content(&content));

        assert_eq!(root.children().len(), 4);
        assert_eq!(root.children()[1].tag(), Some("strong"));
        assert_eq!(root.text_content(), "Sell More3");
        assert_eq!(root.visual_lines(), vec!["Sell More", "3"]);
    }
}
