//! Role-based model configuration from TOML (`[models]` section)

use super::validation::{ConfigIssue, ConfigIssueCode, Severity};
use debate_application::ModelSettings;
use debate_domain::{Model, ModelPool, SLOT_COUNT};
use serde::{Deserialize, Serialize};

/// Role-based model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// pool = ["gemini-2.5-flash", "gemini-2.0-flash"]   # shuffled onto the 4 expert slots
/// judge = "gemini-2.5-pro"
/// judge_fallback = "gemini-2.5-flash"
/// describe = "gemini-2.5-flash"                       # drafts expert descriptions
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub pool: Option<Vec<String>>,
    pub judge: Option<String>,
    pub judge_fallback: Option<String>,
    pub describe: Option<String>,
}

impl FileModelsConfig {
    /// Parse a single model string, collecting issues for empty names.
    fn parse_single_model(field: &str, value: Option<&String>) -> (Option<Model>, Vec<ConfigIssue>) {
        match value {
            None => (None, Vec::new()),
            Some(s) if s.trim().is_empty() => {
                (None, vec![ConfigIssue::empty_model(&format!("models.{}", field))])
            }
            Some(s) => (Some(Model::from(s.trim())), Vec::new()),
        }
    }

    /// Parse the pool, skipping and reporting empty names.
    pub fn parse_pool(&self) -> (Option<Vec<Model>>, Vec<ConfigIssue>) {
        let Some(names) = self.pool.as_ref() else {
            return (None, Vec::new());
        };
        let mut issues = Vec::new();
        let mut models = Vec::new();
        for name in names {
            if name.trim().is_empty() {
                issues.push(ConfigIssue::empty_model("models.pool"));
            } else {
                models.push(Model::from(name.trim()));
            }
        }
        if models.is_empty() {
            issues.push(ConfigIssue::zero("models.pool"));
        } else if models.len() < SLOT_COUNT {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::SmallModelPool { size: models.len() },
                message: format!(
                    "models.pool: {} model(s) for {} expert slots, models will be reused",
                    models.len(),
                    SLOT_COUNT
                ),
            });
        }
        (Some(models), issues)
    }

    pub fn parse_judge(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("judge", self.judge.as_ref())
    }

    pub fn parse_judge_fallback(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("judge_fallback", self.judge_fallback.as_ref())
    }

    pub fn parse_describe(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("describe", self.describe.as_ref())
    }

    /// Settings with defaults filled in for unset or invalid entries
    pub fn to_model_settings(&self) -> ModelSettings {
        let defaults = ModelSettings::default();
        let pool = self
            .parse_pool()
            .0
            .and_then(|models| ModelPool::new(models).ok())
            .unwrap_or(defaults.pool);
        ModelSettings {
            pool,
            judge: self.parse_judge().0.unwrap_or(defaults.judge),
            judge_fallback: self.parse_judge_fallback().0.unwrap_or(defaults.judge_fallback),
            describe: self.parse_describe().0.unwrap_or(defaults.describe),
        }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_pool().1;
        issues.extend(self.parse_judge().1);
        issues.extend(self.parse_judge_fallback().1);
        issues.extend(self.parse_describe().1);
        issues
    }
}
