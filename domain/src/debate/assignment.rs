//! Model pool and per-debate model assignment

use crate::core::error::DomainError;
use crate::core::model::Model;
use rand::Rng;

/// Number of expert slots in a debate
pub const SLOT_COUNT: usize = 4;

/// Interchangeable backends available to the expert slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPool {
    models: Vec<Model>,
}

impl Default for ModelPool {
    fn default() -> Self {
        Self {
            models: Model::default_pool(),
        }
    }
}

impl ModelPool {
    pub fn new(models: Vec<Model>) -> Result<Self, DomainError> {
        if models.is_empty() {
            return Err(DomainError::EmptyModelPool);
        }
        Ok(Self { models })
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Shuffle the pool (Fisher–Yates) and bind the first four entries to the
    /// slots. A pool smaller than four wraps around.
    pub fn assign<R: Rng + ?Sized>(&self, rng: &mut R) -> ModelAssignment {
        let mut shuffled = self.models.clone();
        for i in (1..shuffled.len()).rev() {
            let j = rng.gen_range(0..=i);
            shuffled.swap(i, j);
        }
        let models = (0..SLOT_COUNT)
            .map(|slot| shuffled[slot % shuffled.len()].clone())
            .collect();
        ModelAssignment { models }
    }
}

/// Slot → model binding, fixed for the whole debate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAssignment {
    models: Vec<Model>,
}

impl ModelAssignment {
    /// Explicit assignment, one model per slot
    pub fn fixed(models: Vec<Model>) -> Result<Self, DomainError> {
        if models.len() != SLOT_COUNT {
            return Err(DomainError::InvalidAssignment {
                expected: SLOT_COUNT,
                actual: models.len(),
            });
        }
        Ok(Self { models })
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn for_slot(&self, slot: usize) -> &Model {
        &self.models[slot % SLOT_COUNT]
    }

    pub fn for_turn(&self, turn_index: usize) -> &Model {
        self.for_slot(turn_index % SLOT_COUNT)
    }
}
