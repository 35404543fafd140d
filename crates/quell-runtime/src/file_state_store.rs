//! File-backed toggle store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::StateStoreError;
use crate::state_store::{PersistedToggleState, ToggleStateStore};

/// Stores the toggle flag as a small JSON document.
pub struct FileToggleStateStore {
    path: PathBuf,
}

impl FileToggleStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full record, or `None` when the file does not exist.
    pub async fn read_record(&self) -> Result<Option<PersistedToggleState>, StateStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = tokio::fs::read_to_string(&self.path).await?;
        Ok(Some(serde_json::from_str(&json)?))
    }
}

#[async_trait]
impl ToggleStateStore for FileToggleStateStore {
    async fn load(&self) -> Result<bool, StateStoreError> {
        Ok(self
            .read_record()
            .await?
            .is_some_and(|record| record.is_quell_active))
    }

    async fn save(&self, active: bool) -> Result<(), StateStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&PersistedToggleState::now(active))?;
        tokio::fs::write(&self.path, json).await?;
        debug!(active, path = ?self.path, "Saved toggle state");
        Ok(())
    }

    async fn reset(&self) -> Result<(), StateStoreError> {
        if self.path.exists() {
            tokio::fs::remove_file(&self.path).await?;
            debug!(path = ?self.path, "Removed toggle state file");
        }
        Ok(())
    }
}
