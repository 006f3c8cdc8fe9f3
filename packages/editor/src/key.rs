//! Identifiers shared by the store, spans and export reports

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator-facing name of one fragment of editable copy (e.g. `hero.title`)
///
/// Keys only need to be unique among the spans mounted at export time.
/// Ordering is byte-wise, which is what export sorting relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentKey(String);

impl ContentKey {
    pub fn new(key: impl Into<String>) -> Self {
        ContentKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentKey {
    fn from(key: &str) -> Self {
        ContentKey(key.to_string())
    }
}

impl From<String> for ContentKey {
    fn from(key: String) -> Self {
        ContentKey(key)
    }
}

impl From<&String> for ContentKey {
    fn from(key: &String) -> Self {
        ContentKey(key.clone())
    }
}

impl AsRef<str> for ContentKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Registration handle of one mounted span. Ids increase in mount order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MountId(pub(crate) u64);

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount-{}", self.0)
    }
}

/// Element a span renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    #[default]
    Span,
    Div,
}

impl TagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::H1 => "h1",
            TagKind::H2 => "h2",
            TagKind::H3 => "h3",
            TagKind::H4 => "h4",
            TagKind::H5 => "h5",
            TagKind::H6 => "h6",
            TagKind::P => "p",
            TagKind::Span => "span",
            TagKind::Div => "div",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
