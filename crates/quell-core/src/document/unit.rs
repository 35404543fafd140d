//! Text unit records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::hover::HoverSwap;

/// Stable handle of a block inside a [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(usize);

impl UnitId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit-{}", self.0)
    }
}

/// Visual highlight applied to a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    #[default]
    None,
    /// Showing the neutral rewrite.
    Neutral,
    /// Showing the original (biased) text during hover.
    Biased,
}

impl Marker {
    /// CSS class used when rendering the marker.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Neutral => Some("quell-neutral"),
            Self::Biased => Some("quell-biased"),
        }
    }
}

/// One renderable text-bearing block.
#[derive(Debug, Clone)]
pub struct TextUnit {
    id: UnitId,
    tag: String,
    role: Option<String>,
    text: String,
    marker: Marker,
    hover: Option<HoverSwap>,
}

impl TextUnit {
    pub(crate) fn new(id: UnitId, tag: String, role: Option<String>, text: String) -> Self {
        Self {
            id,
            tag,
            role,
            text,
            marker: Marker::None,
            hover: None,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// ARIA role, if any.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Currently visible text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    pub fn hover(&self) -> Option<&HoverSwap> {
        self.hover.as_ref()
    }

    /// Show the rewrite and register the hover swap.
    pub(crate) fn mark_rewritten(&mut self, original: String, rewritten: String) {
        self.text = rewritten.clone();
        self.marker = Marker::Neutral;
        self.hover = Some(HoverSwap::new(original, rewritten));
    }

    /// Put the original text back and drop marker and hover behavior.
    pub(crate) fn restore(&mut self, original: String) {
        self.text = original;
        self.marker = Marker::None;
        self.hover = None;
    }

    pub(crate) fn hover_enter(&mut self) -> bool {
        let Some(hover) = self.hover.as_mut() else {
            return false;
        };
        match hover.enter() {
            Some((text, marker)) => {
                self.text = text.to_string();
                self.marker = marker;
                true
            }
            None => false,
        }
    }

    pub(crate) fn hover_leave(&mut self) -> bool {
        let Some(hover) = self.hover.as_mut() else {
            return false;
        };
        match hover.leave() {
            Some((text, marker)) => {
                self.text = text.to_string();
                self.marker = marker;
                true
            }
            None => false,
        }
    }
}
