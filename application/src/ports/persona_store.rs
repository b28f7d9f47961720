//! Persona store port
//!
//! Persists user-defined personas between runs. Built-in personas are never
//! stored.

use async_trait::async_trait;
use debate_domain::Persona;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersonaStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt persona file: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait PersonaStore: Send + Sync {
    /// Load all custom personas; an absent store yields an empty list
    async fn load(&self) -> Result<Vec<Persona>, PersonaStoreError>;

    /// Replace the stored custom personas
    async fn save(&self, personas: &[Persona]) -> Result<(), PersonaStoreError>;
}
