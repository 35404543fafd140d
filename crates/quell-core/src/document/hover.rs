//! Per-unit hover swap.
//!
//! Each rewritten unit carries its own two-state machine; units never
//! share hover state.

use super::unit::Marker;

/// Which text a rewritten unit is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverState {
    ShowingNeutral,
    ShowingOriginal,
}

/// Swaps between original and rewritten text on pointer enter/leave.
#[derive(Debug, Clone)]
pub struct HoverSwap {
    original: String,
    rewritten: String,
    state: HoverState,
}

impl HoverSwap {
    pub fn new(original: String, rewritten: String) -> Self {
        Self {
            original,
            rewritten,
            state: HoverState::ShowingNeutral,
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn rewritten(&self) -> &str {
        &self.rewritten
    }

    /// Pointer entered: show the original with the biased marker.
    ///
    /// Returns `None` when already showing the original.
    pub fn enter(&mut self) -> Option<(&str, Marker)> {
        match self.state {
            HoverState::ShowingNeutral => {
                self.state = HoverState::ShowingOriginal;
                Some((&self.original, Marker::Biased))
            }
            HoverState::ShowingOriginal => None,
        }
    }

    /// Pointer left: show the rewrite with the neutral marker.
    ///
    /// Returns `None` when already showing the rewrite.
    pub fn leave(&mut self) -> Option<(&str, Marker)> {
        match self.state {
            HoverState::ShowingOriginal => {
                self.state = HoverState::ShowingNeutral;
                Some((&self.rewritten, Marker::Neutral))
            }
            HoverState::ShowingNeutral => None,
        }
    }
}
