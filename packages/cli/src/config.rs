use copyedit_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "copyedit.config.json";

/// copyedit configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Overlay settings shared with the browser bindings
    #[serde(flatten)]
    pub editor: EditorConfig,

    /// Command (and args) that reads the report on stdin and copies it.
    /// When unset, the usual platform clipboard tools are tried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clipboard_command: Option<Vec<String>>,
}

impl Config {
    /// Load config from an explicit path, or from `cwd` if present there
    pub fn load(cwd: &str, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", config_path.display(), e))?;
            Ok(config)
        } else if explicit.is_some() {
            Err(anyhow::anyhow!("Config file not found: {}", config_path.display()))
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }
}
