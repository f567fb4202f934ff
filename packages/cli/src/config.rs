use ienet_document::Breakpoint;
use ienet_editor::{BuilderOptions, JsonFileStore, DEFAULT_MAX_LEVELS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "ienet.config.json";

/// IeNet configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one `<id>.json` per page
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Undo levels kept per session (0 = unlimited)
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,

    #[serde(default)]
    pub default_breakpoint: Breakpoint,
}

fn default_store_dir() -> String {
    "pages".to_string()
}

fn default_history_depth() -> usize {
    DEFAULT_MAX_LEVELS
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Absolute path to the page store
    pub fn store_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.store_dir)
    }

    pub fn store(&self, cwd: &Path) -> JsonFileStore {
        JsonFileStore::new(self.store_path(cwd))
    }

    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions {
            history_depth: self.history_depth,
            default_breakpoint: self.default_breakpoint,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            history_depth: default_history_depth(),
            default_breakpoint: Breakpoint::Desktop,
        }
    }
}
