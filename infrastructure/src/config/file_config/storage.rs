//! Storage and output configuration (`[storage]` and `[output]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ```toml
/// [storage]
/// data_dir = "~/.local/share/expert-debate"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    pub data_dir: Option<PathBuf>,
}

impl FileStorageConfig {
    /// Configured directory (with `~` expanded), else the platform data dir
    pub fn resolve_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => expand_home(dir),
            None => dirs::data_dir()
                .map(|d| d.join("expert-debate"))
                .unwrap_or_else(|| PathBuf::from(".expert-debate")),
        }
    }
}

fn expand_home(path: &std::path::Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// ```toml
/// [output]
/// color = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}
