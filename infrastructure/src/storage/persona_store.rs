//! JSON file store for custom personas

use super::write_atomic;
use async_trait::async_trait;
use debate_application::ports::persona_store::{PersonaStore, PersonaStoreError};
use debate_domain::Persona;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct JsonPersonaStore {
    path: PathBuf,
}

impl JsonPersonaStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/personas.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("personas.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PersonaStore for JsonPersonaStore {
    async fn load(&self) -> Result<Vec<Persona>, PersonaStoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents)
            .map_err(|e| PersonaStoreError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    async fn save(&self, personas: &[Persona]) -> Result<(), PersonaStoreError> {
        let json = serde_json::to_vec_pretty(personas)
            .map_err(|e| PersonaStoreError::Corrupt(e.to_string()))?;
        write_atomic(&self.path, &json).await?;
        debug!("Saved {} custom personas to {}", personas.len(), self.path.display());
        Ok(())
    }
}
