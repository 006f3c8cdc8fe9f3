//! Editor configuration

use serde::{Deserialize, Serialize};

/// Attribute marking a span as clickable while edit mode is on
pub const EDITABLE_ATTRIBUTE: &str = "data-copy-editable";

/// What happens when a second span mounts under a key that is already live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicateKeyPolicy {
    /// Both mount; the later-mounted span's text wins in exports
    #[default]
    LastWins,

    /// The second mount fails with `EditorError::DuplicateKey`
    Reject,
}

/// Tunables for the copy-edit overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Resolved text longer than this (in chars) edits in a multi-line field
    #[serde(default = "default_multiline_threshold")]
    pub multiline_threshold: usize,

    /// Attribute carrying the content key on every rendered span
    #[serde(default = "default_key_attribute")]
    pub key_attribute: String,

    /// Report title used when the page has none
    #[serde(default = "default_page_title")]
    pub default_page_title: String,

    #[serde(default)]
    pub duplicate_keys: DuplicateKeyPolicy,
}

fn default_multiline_threshold() -> usize {
    50
}

fn default_key_attribute() -> String {
    "data-copy-key".to_string()
}

fn default_page_title() -> String {
    "Page".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            multiline_threshold: default_multiline_threshold(),
            key_attribute: default_key_attribute(),
            default_page_title: default_page_title(),
            duplicate_keys: DuplicateKeyPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "multilineThreshold": 80,
            "keyAttribute": "data-cms-key",
            "duplicateKeys": "reject"
        }"#;

        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.multiline_threshold, 80);
        assert_eq!(config.key_attribute, "data-cms-key");
        assert_eq!(config.default_page_title, "Page");
        assert_eq!(config.duplicate_keys, DuplicateKeyPolicy::Reject);
    }

    #[test]
    fn test_default_config() {
        let config: EditorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.multiline_threshold, 50);
        assert_eq!(config.key_attribute, "data-copy-key");
        assert_eq!(config.duplicate_keys, DuplicateKeyPolicy::LastWins);
    }
}
