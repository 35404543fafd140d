//! [`Document`] to HTML rendering.

use std::fmt::Write;

use super::hover::HoverState;
use super::parse::{NEUTRAL_ATTR, ORIGINAL_ATTR};
use super::Document;

impl Document {
    /// Render the current visible state of every unit as HTML.
    ///
    /// Rewritten units carry their marker class and the original text in
    /// `data-quell-original`, so [`Document::parse_html`] can read the page
    /// back with its rewrites still revertible. A unit hovered at render
    /// time also carries its rewrite in `data-quell-neutral`.
    pub fn render_html(&self) -> String {
        let mut out = String::from("<div class=\"quell-page\">\n");
        for unit in self.units() {
            let _ = write!(out, "<{} data-quell-unit=\"{}\"", unit.tag(), unit.id().index());
            if let Some(role) = unit.role() {
                let _ = write!(out, " role=\"{}\"", escape_html(role));
            }
            if let Some(class) = unit.marker().css_class() {
                let _ = write!(out, " class=\"{class}\"");
            }
            if let Some(hover) = unit.hover() {
                let _ = write!(out, " {ORIGINAL_ATTR}=\"{}\"", escape_html(hover.original()));
                if hover.state() == HoverState::ShowingOriginal {
                    let _ = write!(out, " {NEUTRAL_ATTR}=\"{}\"", escape_html(hover.rewritten()));
                }
            }
            let _ = writeln!(out, ">{}</{}>", escape_html(unit.text()), unit.tag());
        }
        out.push_str("</div>\n");
        out
    }
}

pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
