//! Debate parameters: pacing and retry control.
//!
//! [`DebateParams`] groups the static parameters that control the turn loop
//! in [`RunDebateUseCase`](crate::use_cases::run_debate::RunDebateUseCase)
//! and the retry behaviour of
//! [`GenerateTurnUseCase`](crate::use_cases::generate_turn::GenerateTurnUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry behaviour for a single turn.
///
/// A turn whose trimmed output is shorter than `min_content_chars` is
/// degenerate and retried after `degenerate_backoff`; a gateway failure is
/// retried after `error_backoff`. No backoff follows the final attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: usize,
    pub degenerate_backoff: Duration,
    pub error_backoff: Duration,
    /// Minimum number of characters after trimming.
    pub min_content_chars: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            degenerate_backoff: Duration::from_secs(2),
            error_backoff: Duration::from_secs(3),
            min_content_chars: 10,
        }
    }
}

impl RetryPolicy {
    // ==================== Builder Methods ====================

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn with_degenerate_backoff(mut self, backoff: Duration) -> Self {
        self.degenerate_backoff = backoff;
        self
    }

    pub fn with_error_backoff(mut self, backoff: Duration) -> Self {
        self.error_backoff = backoff;
        self
    }

    pub fn with_min_content_chars(mut self, chars: usize) -> Self {
        self.min_content_chars = chars;
        self
    }

    /// No waiting between attempts.
    pub fn without_backoff(self) -> Self {
        self.with_degenerate_backoff(Duration::ZERO)
            .with_error_backoff(Duration::ZERO)
    }
}

/// Turn loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateParams {
    /// Pause before the first turn.
    pub first_turn_delay: Duration,
    /// Pause between consecutive turns.
    pub inter_turn_delay: Duration,
    pub retry: RetryPolicy,
    /// Upper bound on each judge call before moving down the chain.
    pub judge_timeout: Duration,
}

impl Default for DebateParams {
    fn default() -> Self {
        Self {
            first_turn_delay: Duration::from_millis(1000),
            inter_turn_delay: Duration::from_millis(1500),
            retry: RetryPolicy::default(),
            judge_timeout: Duration::from_secs(60),
        }
    }
}

impl DebateParams {
    /// Parameters with all pacing and backoff removed.
    pub fn immediate() -> Self {
        Self::default().without_pacing()
    }

    /// Zero the turn pauses and retry backoffs, keeping everything else.
    pub fn without_pacing(self) -> Self {
        let retry = self.retry.clone().without_backoff();
        self.with_first_turn_delay(Duration::ZERO)
            .with_inter_turn_delay(Duration::ZERO)
            .with_retry(retry)
    }

    // ==================== Builder Methods ====================

    pub fn with_first_turn_delay(mut self, delay: Duration) -> Self {
        self.first_turn_delay = delay;
        self
    }

    pub fn with_inter_turn_delay(mut self, delay: Duration) -> Self {
        self.inter_turn_delay = delay;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_judge_timeout(mut self, timeout: Duration) -> Self {
        self.judge_timeout = timeout;
        self
    }
}
