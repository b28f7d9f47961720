//! Share store port
//!
//! Persists concluded debates under a short random key.

use async_trait::async_trait;
use debate_domain::{ShareId, ShareRecord};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Debate cannot be shared: {0}")]
    NotShareable(#[from] debate_domain::DomainError),

    #[error("No unused share id found after {0} attempts")]
    IdsExhausted(usize),
}

#[async_trait]
pub trait ShareStore: Send + Sync {
    /// Whether `id` is already taken
    async fn exists(&self, id: &ShareId) -> Result<bool, ShareError>;

    async fn put(&self, id: &ShareId, record: &ShareRecord) -> Result<(), ShareError>;

    /// `None` for an unknown id
    async fn get(&self, id: &ShareId) -> Result<Option<ShareRecord>, ShareError>;
}
