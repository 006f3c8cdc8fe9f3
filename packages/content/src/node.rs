//! # Content Trees
//!
//! The original copy handed to an editable span. A tree is built from four
//! kinds of node: text, numbers, explicit line breaks, and groups of child
//! nodes. Groups may name the element they were written as (`strong`,
//! `span`, ...) so that an untouched span can be rendered back verbatim.
//!
//! Trees usually arrive as JSON from page fixtures or the browser bindings:
//!
//! ```text
//! "Sell More"                                   → Text
//! 42                                            → Number
//! {"type": "br"}  /  {"tag": "br"}              → LineBreak
//! ["Line one", {"type": "br"}, "Line two"]      → Group (anonymous)
//! {"tag": "strong", "children": ["More"]}       → Group (element "strong")
//! ```
//!
//! Anything else decodes to an empty group. Decoding never fails.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

/// Element name that decodes to a line break
pub const LINE_BREAK_TAG: &str = "br";

/// One node of a content tree
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    /// Literal text
    Text(String),

    /// Numeric leaf, stringified the way a browser would
    Number(f64),

    /// Explicit line break
    LineBreak,

    /// Ordered children, optionally wrapped in a named element
    Group(Group),
}

/// Ordered children of a group node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    /// Element the children were written inside (None for a bare sequence)
    pub element: Option<String>,
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    pub fn text(content: impl Into<String>) -> Self {
        ContentNode::Text(content.into())
    }

    pub fn number(value: impl Into<f64>) -> Self {
        ContentNode::Number(value.into())
    }

    pub fn line_break() -> Self {
        ContentNode::LineBreak
    }

    /// Anonymous sequence of nodes
    pub fn sequence(children: impl IntoIterator<Item = ContentNode>) -> Self {
        ContentNode::Group(Group {
            element: None,
            children: children.into_iter().collect(),
        })
    }

    /// Group wrapped in a named element. `br` always yields a line break.
    pub fn element(tag: impl Into<String>, children: impl IntoIterator<Item = ContentNode>) -> Self {
        let tag = tag.into();
        if tag.eq_ignore_ascii_case(LINE_BREAK_TAG) {
            return ContentNode::LineBreak;
        }

        ContentNode::Group(Group {
            element: Some(tag),
            children: children.into_iter().collect(),
        })
    }

    /// Group with no children; contributes nothing to extracted text
    pub fn empty() -> Self {
        ContentNode::Group(Group::default())
    }

    /// Decode a JSON value, mapping unrecognized shapes to an empty group
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => ContentNode::Text(s.clone()),
            Value::Number(n) => n.as_f64().map_or_else(Self::empty, ContentNode::Number),
            Value::Array(items) => Self::sequence(items.iter().map(Self::from_json)),
            Value::Object(fields) => Self::from_json_object(fields),
            Value::Null | Value::Bool(_) => {
                debug!(shape = %value, "Dropping unrecognized content node");
                Self::empty()
            }
        }
    }

    fn from_json_object(fields: &Map<String, Value>) -> Self {
        let kind = fields.get("type").and_then(Value::as_str);
        let tag = fields.get("tag").and_then(Value::as_str);

        if kind == Some(LINE_BREAK_TAG) || tag.is_some_and(|t| t.eq_ignore_ascii_case(LINE_BREAK_TAG)) {
            return ContentNode::LineBreak;
        }

        let children = match fields.get("children") {
            Some(Value::Array(items)) => items.iter().map(Self::from_json).collect(),
            Some(single) => vec![Self::from_json(single)],
            None => Vec::new(),
        };

        match tag {
            Some(tag) => Self::element(tag, children),
            None if fields.contains_key("children") => Self::sequence(children),
            None => {
                debug!(keys = ?fields.keys().collect::<Vec<_>>(), "Dropping unrecognized content object");
                Self::empty()
            }
        }
    }

    /// Encode to the JSON shape accepted by [`ContentNode::from_json`]
    pub fn to_json(&self) -> Value {
        match self {
            ContentNode::Text(s) => Value::String(s.clone()),
            ContentNode::Number(n) => serde_json::Number::from_f64(*n)
                .map_or_else(|| Value::String(format_number(*n)), Value::Number),
            ContentNode::LineBreak => serde_json::json!({ "type": LINE_BREAK_TAG }),
            ContentNode::Group(group) => {
                let children: Vec<Value> = group.children.iter().map(Self::to_json).collect();
                match &group.element {
                    Some(tag) => serde_json::json!({ "tag": tag, "children": children }),
                    None => Value::Array(children),
                }
            }
        }
    }
}

impl From<&str> for ContentNode {
    fn from(s: &str) -> Self {
        ContentNode::Text(s.to_string())
    }
}

impl From<String> for ContentNode {
    fn from(s: String) -> Self {
        ContentNode::Text(s)
    }
}

impl From<f64> for ContentNode {
    fn from(n: f64) -> Self {
        ContentNode::Number(n)
    }
}

impl From<i64> for ContentNode {
    fn from(n: i64) -> Self {
        ContentNode::Number(n as f64)
    }
}

impl From<Vec<ContentNode>> for ContentNode {
    fn from(children: Vec<ContentNode>) -> Self {
        ContentNode::sequence(children)
    }
}

impl Serialize for ContentNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ContentNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(ContentNode::from_json(&value))
    }
}

/// Stringify a number like JavaScript's `Number.prototype.toString`
///
/// Shortest round-trip digits; plain notation for decimal exponents in
/// `-7..21`, exponent form (`1e+21`, `1e-7`) outside it.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        return format!("{}Infinity", sign);
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let sign = if n < 0.0 { "-" } else { "" };

    // `{:e}` yields the shortest digits that round-trip, e.g. `1.25e-7`
    let scientific = format!("{:e}", n.abs());
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Decimal point sits after the first `point` digits
    let point = exponent + 1;

    let body = if k <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{}.{}", int, frac)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let exp_sign = if point - 1 >= 0 { "+" } else { "-" };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, exp_sign, (point - 1).abs())
        } else {
            format!("{}.{}e{}{}", first, rest, exp_sign, (point - 1).abs())
        }
    };

    format!("{}{}", sign, body)
}
