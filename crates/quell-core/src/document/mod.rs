//! Page document model.
//!
//! A page is held as an arena of [`TextUnit`]s addressed by stable
//! [`UnitId`]s, so the ledger can key on ids instead of node identity.

mod hover;
mod parse;
mod render;
mod unit;

pub use hover::{HoverState, HoverSwap};
pub use parse::SelectorRules;
pub(crate) use parse::collapse_whitespace;
pub use unit::{Marker, TextUnit, UnitId};

/// Arena of text-bearing blocks in document order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    units: Vec<TextUnit>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from `(tag, text)` pairs.
    pub fn from_blocks<I, T, S>(blocks: I) -> Self
    where
        I: IntoIterator<Item = (T, S)>,
        T: Into<String>,
        S: Into<String>,
    {
        let mut document = Self::new();
        for (tag, text) in blocks {
            document.push(tag, text);
        }
        document
    }

    /// Append a block and return its id.
    pub fn push(&mut self, tag: impl Into<String>, text: impl Into<String>) -> UnitId {
        self.push_with_role(tag, None, text)
    }

    pub(crate) fn push_with_role(
        &mut self,
        tag: impl Into<String>,
        role: Option<String>,
        text: impl Into<String>,
    ) -> UnitId {
        let id = UnitId::new(self.units.len());
        self.units.push(TextUnit::new(id, tag.into(), role, text.into()));
        id
    }

    /// Append a block that already shows a rewrite of `original`.
    pub(crate) fn push_rewritten(
        &mut self,
        tag: impl Into<String>,
        role: Option<String>,
        original: String,
        rewritten: String,
    ) -> UnitId {
        let id = self.push_with_role(tag, role, original.clone());
        if let Some(unit) = self.units.get_mut(id.index()) {
            unit.mark_rewritten(original, rewritten);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, id: UnitId) -> Option<&TextUnit> {
        self.units.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: UnitId) -> Option<&mut TextUnit> {
        self.units.get_mut(id.index())
    }

    /// All blocks in document order.
    pub fn units(&self) -> &[TextUnit] {
        &self.units
    }

    /// Pointer entered a block. Returns true when the visible text changed.
    pub fn pointer_enter(&mut self, id: UnitId) -> bool {
        self.get_mut(id).is_some_and(TextUnit::hover_enter)
    }

    /// Pointer left a block. Returns true when the visible text changed.
    pub fn pointer_leave(&mut self, id: UnitId) -> bool {
        self.get_mut(id).is_some_and(TextUnit::hover_leave)
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
