//! Mutation and reversion ledger.
//!
//! Every text change made to a [`Document`] goes through here, so a single
//! [`OriginalTextLedger::revert_all`] restores the page exactly.

use std::collections::BTreeMap;
use std::mem;

use tracing::{debug, info};

use crate::document::{Document, UnitId};
use crate::error::LedgerError;

/// Map from rewritten unit to the text it showed before the first rewrite.
#[derive(Debug, Clone, Default)]
pub struct OriginalTextLedger {
    entries: BTreeMap<UnitId, String>,
}

impl OriginalTextLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger of every unit that already shows a rewrite in `document`.
    ///
    /// Used when a previously quelled page is loaded again, so its rewrites
    /// are neither redone nor left unrevertible.
    pub fn from_document(document: &Document) -> Self {
        let entries = document
            .units()
            .iter()
            .filter_map(|unit| {
                unit.hover()
                    .map(|hover| (unit.id(), hover.original().to_string()))
            })
            .collect();
        Self { entries }
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.entries.contains_key(&unit)
    }

    pub fn original(&self, unit: UnitId) -> Option<&str> {
        self.entries.get(&unit).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace a unit's visible text with `new_text`.
    ///
    /// Returns `Ok(false)` without touching the unit when the rewrite is
    /// empty or equal to the current text after trimming.
    pub fn apply(
        &mut self,
        document: &mut Document,
        unit: UnitId,
        new_text: &str,
    ) -> Result<bool, LedgerError> {
        let target = document.get_mut(unit).ok_or(LedgerError::UnknownUnit(unit))?;

        let rewritten = new_text.trim();
        if rewritten.is_empty() || rewritten == target.text().trim() {
            return Ok(false);
        }
        if self.entries.contains_key(&unit) {
            return Err(LedgerError::AlreadyRecorded(unit));
        }

        let original = target.text().to_string();
        self.entries.insert(unit, original.clone());
        target.mark_rewritten(original, rewritten.to_string());
        debug!(%unit, "Recorded rewrite");
        Ok(true)
    }

    /// Restore every recorded unit and empty the ledger.
    ///
    /// Returns the number of units restored. Calling this on an empty ledger
    /// does nothing.
    pub fn revert_all(&mut self, document: &mut Document) -> usize {
        let entries = mem::take(&mut self.entries);
        let mut restored = 0;
        for (unit, original) in entries {
            if let Some(target) = document.get_mut(unit) {
                target.restore(original);
                restored += 1;
            }
        }
        if restored > 0 {
            info!(restored, "Reverted page to original text");
        }
        restored
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
