//! Debate configuration (Entity)

use super::assignment::SLOT_COUNT;
use crate::core::error::DomainError;
use crate::core::topic::Topic;
use crate::persona::entities::PersonaId;
use std::collections::HashSet;

/// Three full rounds of four experts
pub const DEFAULT_TURN_BUDGET: usize = 12;

/// Everything fixed at debate start
///
/// Built once, validated at construction, immutable for the debate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebateConfiguration {
    topic: Topic,
    persona_ids: Vec<PersonaId>,
    turn_budget: usize,
}

impl DebateConfiguration {
    /// Validate a topic and exactly four distinct persona ids
    pub fn new(topic: impl Into<String>, persona_ids: Vec<PersonaId>) -> Result<Self, DomainError> {
        let topic = Topic::new(topic)?;
        if persona_ids.len() != SLOT_COUNT {
            return Err(DomainError::WrongPersonaCount {
                expected: SLOT_COUNT,
                actual: persona_ids.len(),
            });
        }
        let mut seen = HashSet::new();
        for id in &persona_ids {
            if !seen.insert(id) {
                return Err(DomainError::DuplicatePersona(id.to_string()));
            }
        }
        Ok(Self {
            topic,
            persona_ids,
            turn_budget: DEFAULT_TURN_BUDGET,
        })
    }

    pub fn with_turn_budget(mut self, turn_budget: usize) -> Result<Self, DomainError> {
        if turn_budget == 0 {
            return Err(DomainError::ZeroTurnBudget);
        }
        self.turn_budget = turn_budget;
        Ok(self)
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn persona_ids(&self) -> &[PersonaId] {
        &self.persona_ids
    }

    pub fn turn_budget(&self) -> usize {
        self.turn_budget
    }

    /// Slot speaking at `turn_index`
    pub fn slot_for_turn(turn_index: usize) -> usize {
        turn_index % SLOT_COUNT
    }

    pub fn persona_for_turn(&self, turn_index: usize) -> &PersonaId {
        &self.persona_ids[Self::slot_for_turn(turn_index)]
    }
}
