//! File-backed stores under the configured data directory.
//!
//! - [`JsonPersonaStore`] - `<data_dir>/personas.json`
//! - [`JsonShareStore`] - `<data_dir>/shares/<id>.json`

mod persona_store;
mod share_store;

pub use persona_store::JsonPersonaStore;
pub use share_store::JsonShareStore;

use std::path::Path;

/// Write via a sibling temp file and rename, so readers never see a partial file
pub(crate) async fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await
}
