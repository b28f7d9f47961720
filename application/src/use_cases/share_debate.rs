//! Share Debate use case
//!
//! Stores a concluded debate under a random 8-character id and loads it back
//! for read-only viewing.

use crate::ports::share_store::{ShareError, ShareStore};
use debate_domain::{DebateSession, ShareId, ShareRecord};
use std::sync::Arc;
use tracing::{debug, info};

/// Attempts at finding an unused id before giving up
const MAX_ID_ATTEMPTS: usize = 5;

pub struct ShareDebateUseCase<S: ShareStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ShareStore + ?Sized> ShareDebateUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Store a concluded session, returning its id
    pub async fn save(&self, session: &DebateSession) -> Result<ShareId, ShareError> {
        let record = ShareRecord::from_session(session, chrono::Utc::now().timestamp_millis())?;

        let id = self.unused_id().await?;
        self.store.put(&id, &record).await?;
        info!("Debate shared as {}", id);
        Ok(id)
    }

    /// Load a shared debate. Unknown or malformed ids yield `None`.
    pub async fn load(&self, id: &str) -> Result<Option<ShareRecord>, ShareError> {
        let Ok(id) = ShareId::parse(id) else {
            debug!("Malformed share id {:?}", id);
            return Ok(None);
        };
        self.store.get(&id).await
    }

    async fn unused_id(&self) -> Result<ShareId, ShareError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = Self::fresh_id();
            if !self.store.exists(&id).await? {
                return Ok(id);
            }
            debug!("Share id {} already taken", id);
        }
        Err(ShareError::IdsExhausted(MAX_ID_ATTEMPTS))
    }

    fn fresh_id() -> ShareId {
        ShareId::generate(&mut rand::thread_rng())
    }
}
