//! Persisted toggle flag.
//!
//! One boolean, `isQuellActive`, read by every UI surface on open and
//! written on every toggle. It defaults to `false` at install time and after
//! an explicit reset.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StateStoreError;

/// On-disk shape of the toggle flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedToggleState {
    pub is_quell_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl PersistedToggleState {
    pub fn now(active: bool) -> Self {
        Self {
            is_quell_active: active,
            updated_at: Utc::now(),
        }
    }
}

/// Storage for the toggle flag.
#[async_trait]
pub trait ToggleStateStore: Send + Sync {
    /// Current flag; `false` when nothing has been stored.
    async fn load(&self) -> Result<bool, StateStoreError>;

    /// Store the flag.
    async fn save(&self, active: bool) -> Result<(), StateStoreError>;

    /// Forget the stored flag so the next load returns the default.
    async fn reset(&self) -> Result<(), StateStoreError>;
}

/// Write the install-time default.
pub async fn install(store: &dyn ToggleStateStore) -> Result<(), StateStoreError> {
    store.save(false).await?;
    info!("Toggle state initialized to inactive");
    Ok(())
}

/// In-memory toggle store for tests and one-shot runs.
#[derive(Default)]
pub struct MemoryToggleStateStore {
    state: RwLock<Option<PersistedToggleState>>,
}

impl MemoryToggleStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a value.
    pub fn with_state(active: bool) -> Self {
        Self {
            state: RwLock::new(Some(PersistedToggleState::now(active))),
        }
    }

    /// Full record, including the update time.
    pub fn snapshot(&self) -> Option<PersistedToggleState> {
        self.state.read().clone()
    }
}

#[async_trait]
impl ToggleStateStore for MemoryToggleStateStore {
    async fn load(&self) -> Result<bool, StateStoreError> {
        Ok(self
            .state
            .read()
            .as_ref()
            .is_some_and(|state| state.is_quell_active))
    }

    async fn save(&self, active: bool) -> Result<(), StateStoreError> {
        *self.state.write() = Some(PersistedToggleState::now(active));
        Ok(())
    }

    async fn reset(&self) -> Result<(), StateStoreError> {
        *self.state.write() = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "state_store_tests.rs"]
mod tests;
