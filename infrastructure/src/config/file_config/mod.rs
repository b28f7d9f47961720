//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application settings.

mod debate;
mod models;
mod provider;
mod storage;
mod validation;

pub use debate::{FileDebateConfig, FileRetryConfig};
pub use models::FileModelsConfig;
pub use provider::{API_KEY_ENV, FileProviderConfig};
pub use storage::{FileOutputConfig, FileStorageConfig};
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};

use debate_application::DebateParams;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// Turn budget and pacing
    pub debate: FileDebateConfig,
    /// Per-turn retry policy
    pub retry: FileRetryConfig,
    /// Gemini connection settings
    pub provider: FileProviderConfig,
    /// Where personas and shares live
    pub storage: FileStorageConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    pub fn debate_params(&self) -> DebateParams {
        self.debate.to_debate_params(&self.retry)
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.models.validate();

        if self.debate.turn_budget == 0 {
            issues.push(ConfigIssue::zero("debate.turn_budget"));
        }
        if self.debate.judge_timeout_secs == 0 {
            issues.push(ConfigIssue::zero("debate.judge_timeout_secs"));
        }
        if self.retry.max_attempts == 0 {
            issues.push(ConfigIssue::zero("retry.max_attempts"));
        }
        if self.provider.request_timeout_secs == 0 {
            issues.push(ConfigIssue::zero("provider.request_timeout_secs"));
        }

        issues
    }
}
