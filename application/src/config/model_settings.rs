//! Model roles for a debate.

use debate_domain::{DomainError, Model, ModelPool};

/// Which models serve as debaters, judge, and description assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub pool: ModelPool,
    pub judge: Model,
    pub judge_fallback: Model,
    pub describe: Model,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            pool: ModelPool::default(),
            judge: Model::default_judge(),
            judge_fallback: Model::default_judge_fallback(),
            describe: Model::default_describe(),
        }
    }
}

impl ModelSettings {
    pub fn with_pool(mut self, models: Vec<Model>) -> Result<Self, DomainError> {
        self.pool = ModelPool::new(models)?;
        Ok(self)
    }

    pub fn with_judge(mut self, judge: Model, fallback: Model) -> Self {
        self.judge = judge;
        self.judge_fallback = fallback;
        self
    }

    pub fn with_describe(mut self, model: Model) -> Self {
        self.describe = model;
        self
    }
}
