//! # Text Extraction
//!
//! Flattens a content tree into the plain text an operator sees and edits.
//! Line breaks survive as `'\n'`; everything else is concatenated with no
//! separator, so adjacent text nodes must carry their own whitespace.

use crate::node::{format_number, ContentNode};

/// Flatten a content tree into a single string
pub fn extract(node: &ContentNode) -> String {
    let mut out = String::new();
    extract_into(node, &mut out);
    out
}

/// Flatten a list of sibling nodes
pub fn extract_all(nodes: &[ContentNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        extract_into(node, &mut out);
    }
    out
}

fn extract_into(node: &ContentNode, out: &mut String) {
    match node {
        ContentNode::Text(text) => out.push_str(text),
        ContentNode::Number(n) => out.push_str(&format_number(*n)),
        ContentNode::LineBreak => out.push('\n'),
        ContentNode::Group(group) => {
            for child in &group.children {
                extract_into(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_text() {
        assert_eq!(extract(&ContentNode::text("Sell More")), "Sell More");
    }

    #[test]
    fn test_extract_number() {
        assert_eq!(extract(&ContentNode::number(250)), "250");
    }

    #[test]
    fn test_extract_line_break_in_sequence() {
        let node = ContentNode::sequence([
            ContentNode::text("Line one"),
            ContentNode::line_break(),
            ContentNode::text("Line two"),
        ]);

        assert_eq!(extract(&node), "Line one\nLine two");
    }

    #[test]
    fn test_extract_nested_elements() {
        let node = ContentNode::sequence([
            ContentNode::text("We build "),
            ContentNode::element(
                "span",
                [
                    ContentNode::element("strong", [ContentNode::text("bold")]),
                    ContentNode::text(" brands"),
                ],
            ),
            ContentNode::text(" since "),
            ContentNode::number(2011),
        ]);

        assert_eq!(extract(&node), "We build bold brands since 2011");
    }

    #[test]
    fn test_extract_empty_group() {
        assert_eq!(extract(&ContentNode::empty()), "");
    }

    #[test]
    fn test_extract_all_siblings() {
        let nodes = vec![ContentNode::text("a"), ContentNode::line_break(), ContentNode::text("b")];
        assert_eq!(extract_all(&nodes), "a\nb");
    }
}
