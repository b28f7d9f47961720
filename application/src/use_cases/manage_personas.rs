//! Manage Personas use case
//!
//! Loads the persona registry (built-ins plus stored custom personas) and
//! applies add, update and remove to the custom set, persisting each change.

use crate::ports::persona_store::{PersonaStore, PersonaStoreError};
use debate_domain::{DomainError, Persona, PersonaId, PersonaRegistry};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ManagePersonasError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Persona store error: {0}")]
    Store(#[from] PersonaStoreError),
}

pub struct ManagePersonasUseCase<S: PersonaStore + ?Sized> {
    store: Arc<S>,
}

impl<S: PersonaStore + ?Sized> ManagePersonasUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Built-in personas plus whatever custom personas are stored
    pub async fn registry(&self) -> Result<PersonaRegistry, ManagePersonasError> {
        let custom = self.store.load().await?;
        Ok(PersonaRegistry::new().with_custom(custom))
    }

    pub async fn add(&self, name: &str, description: &str) -> Result<Persona, ManagePersonasError> {
        let mut registry = self.registry().await?;
        let persona = registry.add_custom(name, description)?;
        self.store.save(registry.custom()).await?;
        info!("Added expert {} ({})", persona.name(), persona.id());
        Ok(persona)
    }

    pub async fn update(
        &self,
        id: &PersonaId,
        name: &str,
        description: &str,
    ) -> Result<Persona, ManagePersonasError> {
        let mut registry = self.registry().await?;
        let persona = registry.update_custom(id, name, description)?;
        self.store.save(registry.custom()).await?;
        info!("Updated expert {}", persona.id());
        Ok(persona)
    }

    pub async fn remove(&self, id: &PersonaId) -> Result<Persona, ManagePersonasError> {
        let mut registry = self.registry().await?;
        let persona = registry.remove_custom(id)?;
        self.store.save(registry.custom()).await?;
        info!("Removed expert {}", persona.id());
        Ok(persona)
    }
}
