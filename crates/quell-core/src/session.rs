//! Rewrite session manager.
//!
//! Holds at most one live session per capability kind. Sessions are created
//! lazily by [`SessionManager::ensure_ready`] and destroyed together by
//! [`SessionManager::teardown`], so every activation starts fresh.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use quell_protocols::{CapabilityError, CapabilityKind, CapabilityProvider, CapabilitySession, SessionConfig};

use crate::error::QuellError;

/// Lifecycle of one capability session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Absent,
    Creating,
    Ready,
    /// The handle exists but the session behind it was destroyed.
    Destroyed,
}

enum Slot {
    Creating,
    Ready(Arc<dyn CapabilitySession>),
}

/// Lazily creates and caches one session per capability kind.
pub struct SessionManager {
    provider: Arc<dyn CapabilityProvider>,
    configs: HashMap<CapabilityKind, SessionConfig>,
    slots: HashMap<CapabilityKind, Slot>,
}

impl SessionManager {
    pub fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self {
            provider,
            configs: HashMap::new(),
            slots: HashMap::new(),
        }
    }

    /// Override the creation options for one kind.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.configs.insert(config.kind(), config);
        self
    }

    pub fn provider(&self) -> &Arc<dyn CapabilityProvider> {
        &self.provider
    }

    pub fn state(&self, kind: CapabilityKind) -> SessionState {
        match self.slots.get(&kind) {
            None => SessionState::Absent,
            Some(Slot::Creating) => SessionState::Creating,
            Some(Slot::Ready(session)) if session.is_destroyed() => SessionState::Destroyed,
            Some(Slot::Ready(_)) => SessionState::Ready,
        }
    }

    /// The live session for `kind`, if one is ready.
    pub fn session(&self, kind: CapabilityKind) -> Option<Arc<dyn CapabilitySession>> {
        match self.slots.get(&kind) {
            Some(Slot::Ready(session)) if !session.is_destroyed() => Some(Arc::clone(session)),
            _ => None,
        }
    }

    /// Make sure a session exists for every requested kind.
    ///
    /// A creation failure for the essential kind is returned as an error.
    /// Failures for optional kinds are logged and the kind stays absent.
    pub async fn ensure_ready(&mut self, kinds: &[CapabilityKind]) -> Result<(), QuellError> {
        for &kind in kinds {
            match self.acquire(kind).await {
                Ok(_) => {}
                Err(e) if kind.is_essential() => {
                    error!(%kind, error = %e, "Essential capability could not be created");
                    return Err(e.into());
                }
                Err(e) => {
                    warn!(%kind, error = %e, "Optional capability not ready, stage will be skipped");
                }
            }
        }
        Ok(())
    }

    /// Return the live session for `kind`, creating it first if needed.
    pub async fn acquire(
        &mut self,
        kind: CapabilityKind,
    ) -> Result<Arc<dyn CapabilitySession>, CapabilityError> {
        if let Some(session) = self.session(kind) {
            return Ok(session);
        }

        self.slots.insert(kind, Slot::Creating);
        match self.create(kind).await {
            Ok(session) => {
                info!(%kind, provider = self.provider.id(), "Capability session ready");
                self.slots.insert(kind, Slot::Ready(Arc::clone(&session)));
                Ok(session)
            }
            Err(e) => {
                self.slots.remove(&kind);
                Err(e)
            }
        }
    }

    async fn create(&self, kind: CapabilityKind) -> Result<Arc<dyn CapabilitySession>, CapabilityError> {
        let availability = self.provider.availability(kind).await;
        if !availability.is_usable() {
            return Err(CapabilityError::Unavailable(kind));
        }
        debug!(%kind, ?availability, "Creating capability session");

        let config = self
            .configs
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| SessionConfig::default_for(kind));
        self.provider.create_session(config).await
    }

    /// Destroy every live session and reset all kinds to absent.
    ///
    /// Returns the number of sessions destroyed.
    pub async fn teardown(&mut self) -> usize {
        let slots: Vec<(CapabilityKind, Slot)> = self.slots.drain().collect();
        let mut destroyed = 0;
        for (kind, slot) in slots {
            if let Slot::Ready(session) = slot {
                if !session.is_destroyed() {
                    session.destroy().await;
                    destroyed += 1;
                    debug!(%kind, "Capability session destroyed");
                }
            }
        }
        destroyed
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
