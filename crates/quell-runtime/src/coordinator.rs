//! Toggle coordinator.
//!
//! Sits between a UI surface and the content-side pipeline. The persisted
//! flag is written optimistically before the pipeline runs and put back to
//! its previous value if the pipeline fails or never answers. Every toggle
//! gets exactly one [`QuellResponse`].

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{error, info, warn};

use quell_core::{ChannelError, ContentChannel};
use quell_protocols::{QuellResponse, ToggleStateResponse, UiRequest};

use crate::state_store::ToggleStateStore;

/// Message returned when a toggle arrives during another transition.
pub const TOGGLE_IN_PROGRESS: &str = "toggle already in progress";

/// Where the page is in its on/off lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TogglePhase {
    Inactive,
    Activating,
    Active,
    Deactivating,
}

impl TogglePhase {
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Activating | Self::Deactivating)
    }
}

/// Answer to any [`UiRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UiResponse {
    State(ToggleStateResponse),
    Toggle(QuellResponse),
}

/// Puts the phase back if a transition is abandoned before it finishes.
struct Transition<'a> {
    phase: &'a Mutex<TogglePhase>,
    fallback: TogglePhase,
    settled: bool,
}

impl Transition<'_> {
    fn settle(mut self, phase: TogglePhase) {
        *self.phase.lock() = phase;
        self.settled = true;
    }
}

impl Drop for Transition<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.phase.lock() = self.fallback;
        }
    }
}

/// Relays toggle requests to the content pipeline and keeps the persisted
/// flag in step with the outcome.
pub struct ToggleCoordinator {
    store: Arc<dyn ToggleStateStore>,
    channel: Arc<dyn ContentChannel>,
    phase: Mutex<TogglePhase>,
    response_timeout: Duration,
}

impl ToggleCoordinator {
    pub fn new(
        store: Arc<dyn ToggleStateStore>,
        channel: Arc<dyn ContentChannel>,
        response_timeout: Duration,
    ) -> Self {
        Self {
            store,
            channel,
            phase: Mutex::new(TogglePhase::Inactive),
            response_timeout,
        }
    }

    pub fn phase(&self) -> TogglePhase {
        *self.phase.lock()
    }

    /// Read the persisted flag. A read failure reports inactive.
    pub async fn request_toggle_state(&self) -> ToggleStateResponse {
        let active = match self.store.load().await {
            Ok(active) => active,
            Err(e) => {
                warn!(error = %e, "Could not read toggle state, reporting inactive");
                false
            }
        };
        ToggleStateResponse { active }
    }

    pub async fn handle(&self, request: UiRequest) -> UiResponse {
        match request {
            UiRequest::GetToggleState => UiResponse::State(self.request_toggle_state().await),
            UiRequest::Toggle { new_state } => UiResponse::Toggle(self.toggle(new_state).await),
        }
    }

    /// Turn page quelling on or off.
    ///
    /// A toggle that arrives while another one is still running is rejected.
    pub async fn toggle(&self, new_state: bool) -> QuellResponse {
        let Some(transition) = self.begin(new_state) else {
            warn!(new_state, "Rejected toggle during transition");
            return QuellResponse::failure(TOGGLE_IN_PROGRESS);
        };

        let previous = match self.store.load().await {
            Ok(previous) => previous,
            Err(e) => {
                warn!(error = %e, "Could not read toggle state, assuming inactive");
                false
            }
        };

        if let Err(e) = self.store.save(new_state).await {
            error!(error = %e, "Could not persist toggle state");
            return QuellResponse::failure(format!("Could not save toggle state: {e}"));
        }

        let response = match tokio::time::timeout(
            self.response_timeout,
            self.channel.run_full_quell(new_state),
        )
        .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => Self::communication_failure(&e),
            Err(_) => Self::communication_failure(&ChannelError::Timeout(
                self.response_timeout.as_secs(),
            )),
        };

        if response.success {
            let settled = if new_state {
                TogglePhase::Active
            } else {
                TogglePhase::Inactive
            };
            transition.settle(settled);
            info!(
                active = new_state,
                changes = response.changes_made.unwrap_or_default(),
                "Toggle complete"
            );
        } else {
            if let Err(e) = self.store.save(previous).await {
                error!(error = %e, "Could not restore toggle state");
            }
            let fallback = transition.fallback;
            transition.settle(fallback);
            warn!(
                active = new_state,
                error = response.error.as_deref().unwrap_or_default(),
                "Toggle failed, state restored"
            );
        }
        response
    }

    fn begin(&self, new_state: bool) -> Option<Transition<'_>> {
        let mut phase = self.phase.lock();
        if phase.is_transitioning() {
            return None;
        }
        let fallback = *phase;
        *phase = if new_state {
            TogglePhase::Activating
        } else {
            TogglePhase::Deactivating
        };
        Some(Transition {
            phase: &self.phase,
            fallback,
            settled: false,
        })
    }

    fn communication_failure(err: &ChannelError) -> QuellResponse {
        error!(error = %err, "Content pipeline did not answer");
        QuellResponse::failure(format!("Could not communicate with the page: {err}"))
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
