//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Configuration errors are raised synchronously when a debate is started and
/// never after; the remaining variants guard the session state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Debate topic cannot be empty")]
    EmptyTopic,

    #[error("Exactly {expected} experts are required, got {actual}")]
    WrongPersonaCount { expected: usize, actual: usize },

    #[error("Expert '{0}' was selected more than once")]
    DuplicatePersona(String),

    #[error("Unknown expert: {0}")]
    UnknownPersona(String),

    #[error("Model pool is empty")]
    EmptyModelPool,

    #[error("Model assignment needs {expected} models, got {actual}")]
    InvalidAssignment { expected: usize, actual: usize },

    #[error("Turn budget must be at least 1")]
    ZeroTurnBudget,

    #[error("Invalid expert: {0}")]
    InvalidPersona(String),

    #[error("Invalid share id: {0}")]
    InvalidShareId(String),

    #[error("Cannot {action} while the debate is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    #[error("Turn message does not belong to the current slot: {0}")]
    UnexpectedTurn(String),
}

impl DomainError {
    /// Check if this error is a configuration error raised at debate start
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyTopic
                | DomainError::WrongPersonaCount { .. }
                | DomainError::DuplicatePersona(_)
                | DomainError::UnknownPersona(_)
                | DomainError::EmptyModelPool
                | DomainError::ZeroTurnBudget
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_count_display() {
        let error = DomainError::WrongPersonaCount {
            expected: 4,
            actual: 3,
        };
        assert_eq!(error.to_string(), "Exactly 4 experts are required, got 3");
    }

    #[test]
    fn test_configuration_error_classification() {
        assert!(DomainError::EmptyTopic.is_configuration_error());
        assert!(DomainError::EmptyModelPool.is_configuration_error());
        assert!(DomainError::UnknownPersona("x".to_string()).is_configuration_error());
        assert!(
            !DomainError::InvalidTransition {
                action: "stop",
                phase: "idle"
            }
            .is_configuration_error()
        );
    }
}
