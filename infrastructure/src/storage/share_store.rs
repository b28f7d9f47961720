//! JSON file store for shared debates

use super::write_atomic;
use async_trait::async_trait;
use debate_application::ports::share_store::{ShareError, ShareStore};
use debate_domain::{ShareId, ShareRecord};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One pretty-printed JSON file per share id
pub struct JsonShareStore {
    dir: PathBuf,
}

impl JsonShareStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store at `<data_dir>/shares`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("shares"))
    }

    fn record_path(&self, id: &ShareId) -> PathBuf {
        // ShareId is alphanumeric only, so it is always a plain file name
        self.dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl ShareStore for JsonShareStore {
    async fn exists(&self, id: &ShareId) -> Result<bool, ShareError> {
        Ok(tokio::fs::try_exists(self.record_path(id)).await?)
    }

    async fn put(&self, id: &ShareId, record: &ShareRecord) -> Result<(), ShareError> {
        let json = record.to_json()?;
        write_atomic(&self.record_path(id), json.as_bytes()).await?;
        Ok(())
    }

    async fn get(&self, id: &ShareId) -> Result<Option<ShareRecord>, ShareError> {
        match tokio::fs::read_to_string(self.record_path(id)).await {
            Ok(json) => Ok(Some(ShareRecord::from_json(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
