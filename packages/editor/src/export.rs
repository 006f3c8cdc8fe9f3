//! # Export Reports
//!
//! Flattens every mounted span into a sorted, human-readable dump:
//!
//! ```text
//! Page: Home
//! URL: /
//!
//! hero.subtitle: Websites that convert
//! hero.title: Sell More
//! ```
//!
//! Resolution per scanned span: the override if one is stored for its key,
//! otherwise the span's own text. Empty results are dropped, later scans of
//! a key replace earlier ones, and lines are ordered by key so successive
//! exports diff cleanly.

use crate::key::{ContentKey, TagKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Header data for a report
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    pub title: String,
    pub path: String,
}

impl PageInfo {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }
}

/// One line of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportEntry {
    pub key: ContentKey,
    pub text: String,
    pub tag: TagKind,
}

/// Snapshot of all resolved copy on a page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportReport {
    pub title: String,
    pub path: String,
    pub entries: Vec<ExportEntry>,
}

impl ExportReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, key: &str) -> Option<&ExportEntry> {
        self.entries.iter().find(|e| e.key.as_str() == key)
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page: {}", self.title)?;
        writeln!(f, "URL: {}", self.path)?;
        writeln!(f)?;

        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", entry.key, entry.text)?;
        }

        Ok(())
    }
}

/// A mounted span as seen by the export scan
#[derive(Debug, Clone, Copy)]
pub struct ScannedSpan<'a> {
    pub key: &'a ContentKey,
    pub tag: TagKind,
    /// Text the span shows when no override applies
    pub text: &'a str,
}

/// Build a report from spans in scan order
pub fn build_report<'a>(
    page: PageInfo,
    scanned: impl IntoIterator<Item = ScannedSpan<'a>>,
    overrides: &BTreeMap<ContentKey, String>,
) -> ExportReport {
    let mut by_key: BTreeMap<ContentKey, ExportEntry> = BTreeMap::new();

    for span in scanned {
        let raw = overrides.get(span.key).map_or(span.text, String::as_str);
        let text = normalize_text(raw);

        if text.is_empty() {
            continue;
        }

        let entry = ExportEntry {
            key: span.key.clone(),
            text,
            tag: span.tag,
        };

        if by_key.insert(span.key.clone(), entry).is_some() {
            debug!(key = %span.key, "Duplicate content key in export scan, keeping later span");
        }
    }

    ExportReport {
        title: page.title,
        path: page.path,
        entries: by_key.into_values().collect(),
    }
}

/// Fold whitespace runs to single spaces while keeping line breaks
///
/// Each line is collapsed and trimmed; blank lines at either end are removed.
pub fn normalize_text(text: &str) -> String {
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();

    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());

    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
