//! Text block selection.

use crate::document::{Document, TextUnit, UnitId};
use crate::ledger::OriginalTextLedger;

/// Picks the blocks worth sending to the rewriter.
///
/// A block qualifies when its trimmed text is longer than the threshold and
/// it has never been rewritten in the current activation.
#[derive(Debug, Clone, Copy)]
pub struct TextBlockSelector {
    min_text_length: usize,
}

impl TextBlockSelector {
    pub fn new(min_text_length: usize) -> Self {
        Self { min_text_length }
    }

    pub fn min_text_length(&self) -> usize {
        self.min_text_length
    }

    /// Length check alone, in characters of trimmed text.
    pub fn is_candidate(&self, unit: &TextUnit) -> bool {
        unit.text().trim().chars().count() > self.min_text_length
    }

    /// Candidate ids in document order.
    pub fn select(&self, document: &Document, ledger: &OriginalTextLedger) -> Vec<UnitId> {
        document
            .units()
            .iter()
            .filter(|unit| !ledger.contains(unit.id()))
            .filter(|unit| self.is_candidate(unit))
            .map(TextUnit::id)
            .collect()
    }
}

impl Default for TextBlockSelector {
    fn default() -> Self {
        Self::new(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_filters_by_trimmed_length() {
        let doc = Document::from_blocks([
            ("p", "short"),
            ("p", "\t nineteen chars here \n"),
            ("p", "   exactly twenty chars   "),
            ("p", "  twenty-one characters  "),
            ("p", "this one is comfortably longer than the limit"),
            ("li", "                                  "),
        ]);
        let selector = TextBlockSelector::new(20);
        let picked = selector.select(&doc, &OriginalTextLedger::new());
        assert_eq!(picked, vec![UnitId::new(3), UnitId::new(4)]);
    }

    #[test]
    fn test_is_candidate_counts_chars_not_bytes() {
        let doc = Document::from_blocks([
            ("p", "déjà vu à la française"),
            ("p", "éééééééééééééééééééé"),
        ]);
        let selector = TextBlockSelector::new(20);
        assert_eq!(doc.units()[0].text().chars().count(), 22);
        assert!(selector.is_candidate(&doc.units()[0]));
        // Twenty chars, forty bytes.
        assert!(!selector.is_candidate(&doc.units()[1]));
    }

    #[test]
    fn test_select_skips_ledgered_units() {
        let mut doc = Document::from_blocks([
            ("p", "the first very long paragraph of text"),
            ("p", "the second very long paragraph of text"),
        ]);
        let mut ledger = OriginalTextLedger::new();
        ledger
            .apply(&mut doc, UnitId::new(0), "calmer first paragraph of text")
            .unwrap();

        let picked = TextBlockSelector::new(20).select(&doc, &ledger);
        assert_eq!(picked, vec![UnitId::new(1)]);
    }

    #[test]
    fn test_select_empty_document() {
        let picked = TextBlockSelector::default().select(&Document::new(), &OriginalTextLedger::new());
        assert!(picked.is_empty());
    }
}
