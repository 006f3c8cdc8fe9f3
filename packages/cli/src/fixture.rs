//! Page fixtures: the spans a page mounts, as JSON

use anyhow::{Context, Result};
use copyedit_content::ContentNode;
use copyedit_editor::{CopyEditStore, EditableSpan, PageInfo, TagKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct PageFixture {
    #[serde(default)]
    pub title: String,

    #[serde(default = "default_path")]
    pub path: String,

    pub spans: Vec<SpanFixture>,

    /// Overrides already stored when the session starts
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpanFixture {
    pub key: String,

    #[serde(default)]
    pub tag: TagKind,

    pub content: ContentNode,
}

fn default_path() -> String {
    "/".to_string()
}

impl PageFixture {
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read page fixture {}", path.display()))?;
        serde_json::from_str(&source)
            .with_context(|| format!("Invalid page fixture {}", path.display()))
    }

    pub fn page(&self) -> PageInfo {
        PageInfo::new(self.title.as_str(), self.path.as_str())
    }

    /// Mount every span in order and seed the fixture's overrides
    pub fn mount(&self, store: &CopyEditStore) -> Result<Vec<EditableSpan>> {
        let spans = self
            .spans
            .iter()
            .map(|span| {
                EditableSpan::mount_as(store, span.key.as_str(), span.content.clone(), span.tag)
                    .with_context(|| format!("Cannot mount span {}", span.key))
            })
            .collect::<Result<Vec<_>>>()?;

        for (key, value) in &self.overrides {
            store.set_override(key, value.as_str());
        }

        Ok(spans)
    }
}
