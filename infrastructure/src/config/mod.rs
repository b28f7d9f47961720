//! Configuration file loading for expert-debate
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DEBATE_<SECTION>__<KEY>` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./debate.toml` or `./.debate.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/expert-debate/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    API_KEY_ENV, ConfigIssue, ConfigIssueCode, FileConfig, FileDebateConfig, FileModelsConfig,
    FileOutputConfig, FileProviderConfig, FileRetryConfig, FileStorageConfig, Severity,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
