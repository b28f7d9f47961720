//! Debate pacing and retry configuration (`[debate]` and `[retry]` sections)

use debate_application::{DebateParams, RetryPolicy};
use debate_domain::DEFAULT_TURN_BUDGET;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// ```toml
/// [debate]
/// turn_budget = 12
/// first_turn_delay_ms = 1000
/// inter_turn_delay_ms = 1500
/// judge_timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    pub turn_budget: usize,
    pub first_turn_delay_ms: u64,
    pub inter_turn_delay_ms: u64,
    pub judge_timeout_secs: u64,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            turn_budget: DEFAULT_TURN_BUDGET,
            first_turn_delay_ms: 1000,
            inter_turn_delay_ms: 1500,
            judge_timeout_secs: 60,
        }
    }
}

/// ```toml
/// [retry]
/// max_attempts = 3
/// degenerate_backoff_ms = 2000
/// error_backoff_ms = 3000
/// min_content_chars = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_attempts: usize,
    pub degenerate_backoff_ms: u64,
    pub error_backoff_ms: u64,
    pub min_content_chars: usize,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            degenerate_backoff_ms: 2000,
            error_backoff_ms: 3000,
            min_content_chars: 10,
        }
    }
}

impl FileRetryConfig {
    pub fn to_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(self.max_attempts)
            .with_degenerate_backoff(Duration::from_millis(self.degenerate_backoff_ms))
            .with_error_backoff(Duration::from_millis(self.error_backoff_ms))
            .with_min_content_chars(self.min_content_chars)
    }
}

impl FileDebateConfig {
    pub fn to_debate_params(&self, retry: &FileRetryConfig) -> DebateParams {
        DebateParams::default()
            .with_first_turn_delay(Duration::from_millis(self.first_turn_delay_ms))
            .with_inter_turn_delay(Duration::from_millis(self.inter_turn_delay_ms))
            .with_retry(retry.to_retry_policy())
            .with_judge_timeout(Duration::from_secs(self.judge_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_application_defaults() {
        let params = FileDebateConfig::default().to_debate_params(&FileRetryConfig::default());
        assert_eq!(params, DebateParams::default());
    }

    #[test]
    fn test_zero_pacing() {
        let debate = FileDebateConfig {
            first_turn_delay_ms: 0,
            inter_turn_delay_ms: 0,
            ..Default::default()
        };
        let retry = FileRetryConfig {
            degenerate_backoff_ms: 0,
            error_backoff_ms: 0,
            ..Default::default()
        };
        let params = debate.to_debate_params(&retry);
        assert_eq!(params, DebateParams::immediate());
    }
}
