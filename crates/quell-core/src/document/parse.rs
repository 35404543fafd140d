//! HTML to [`Document`] conversion.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::Document;
use crate::error::QuellError;

/// Block-level tags that can hold a quellable sentence.
pub const BLOCK_SELECTOR: &str = "p, li, h2, h3, h4";

/// Container selectors considered when `include_containers` is set.
pub const CONTAINER_SELECTOR: &str = "article, section, [role=main]";

/// Original text of a unit rendered after a rewrite.
pub(crate) const ORIGINAL_ATTR: &str = "data-quell-original";

/// Neutral text of a unit rendered while it was showing its original.
pub(crate) const NEUTRAL_ATTR: &str = "data-quell-neutral";

/// Subtrees never read.
const IGNORED_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Allow-list of tags/roles that become text units.
#[derive(Debug, Clone, Default)]
pub struct SelectorRules {
    include_containers: bool,
}

impl SelectorRules {
    pub fn new(include_containers: bool) -> Self {
        Self { include_containers }
    }

    pub fn include_containers(&self) -> bool {
        self.include_containers
    }

    /// Combined CSS selector for every allowed element.
    pub fn css(&self) -> String {
        if self.include_containers {
            format!("{BLOCK_SELECTOR}, {CONTAINER_SELECTOR}")
        } else {
            BLOCK_SELECTOR.to_string()
        }
    }
}

impl Document {
    /// Parse HTML into a document of allow-listed blocks, in document order.
    ///
    /// Nested matches are dropped (the outermost block wins). Containers are
    /// only kept when they hold no block children of their own. Blocks
    /// rendered after a rewrite come back rewritten, with their original
    /// text and hover swap restored from the `data-quell-*` attributes.
    pub fn parse_html(html: &str, rules: &SelectorRules) -> Result<Self, QuellError> {
        let page = Html::parse_document(html);
        let css = rules.css();
        let allowed = parse_selector(&css)?;
        let blocks = parse_selector(BLOCK_SELECTOR)?;

        let mut document = Document::new();
        let mut matched = HashSet::new();

        for element in page.select(&allowed) {
            if has_ignored_ancestor(&element) {
                continue;
            }
            if element.ancestors().any(|ancestor| matched.contains(&ancestor.id())) {
                continue;
            }

            let tag = element.value().name();
            let is_block = blocks.matches(&element);
            if !is_block && element.select(&blocks).next().is_some() {
                continue;
            }

            let text = collapse_whitespace(&element.text().collect::<String>());
            if text.is_empty() {
                continue;
            }

            matched.insert(element.id());
            let role = element.value().attr("role").map(str::to_string);
            match element.value().attr(ORIGINAL_ATTR) {
                Some(original) => {
                    let rewritten = element
                        .value()
                        .attr(NEUTRAL_ATTR)
                        .map(str::to_string)
                        .unwrap_or(text);
                    document.push_rewritten(tag, role, original.to_string(), rewritten);
                }
                None => {
                    document.push_with_role(tag, role, text);
                }
            }
        }

        debug!(units = document.len(), "Parsed page document");
        Ok(document)
    }
}

fn parse_selector(css: &str) -> Result<Selector, QuellError> {
    Selector::parse(css).map_err(|e| QuellError::Selector(format!("{css}: {e:?}")))
}

fn has_ignored_ancestor(element: &ElementRef<'_>) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|el| IGNORED_TAGS.contains(&el.name()))
    })
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub(crate) fn collapse_whitespace(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space && !buf.is_empty() {
                buf.push(' ');
            }
            last_space = true;
        } else {
            buf.push(ch);
            last_space = false;
        }
    }
    if buf.ends_with(' ') {
        buf.pop();
    }
    buf
}
