//! Readable article extraction from raw HTML.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::document::collapse_whitespace;
use crate::error::QuellError;

/// Readable text pulled out of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: Option<String>,
    /// Paragraphs separated by blank lines.
    pub text: String,
}

impl Article {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Turns a page into its main article text.
pub trait ArticleExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Result<Article, QuellError>;
}

/// Root-and-strip extractor over `scraper`.
///
/// Takes the first matching root, removes chrome such as navigation and
/// footers, and joins the remaining paragraphs.
#[derive(Debug, Clone)]
pub struct HtmlArticleExtractor {
    roots: Vec<String>,
    strip: String,
    paragraphs: String,
}

impl Default for HtmlArticleExtractor {
    fn default() -> Self {
        Self {
            roots: ["article", "main", "[role=main]", "body"]
                .into_iter()
                .map(String::from)
                .collect(),
            strip: "script, style, nav, header, footer, aside, noscript".to_string(),
            paragraphs: "p, li, h2, h3, h4, blockquote, pre".to_string(),
        }
    }
}

impl HtmlArticleExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the root candidates, tried in order.
    pub fn with_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roots = roots.into_iter().map(Into::into).collect();
        self
    }

    fn find_root<'a>(&self, page: &'a Html) -> Result<Option<ElementRef<'a>>, QuellError> {
        for css in &self.roots {
            let selector = parse_selector(css)?;
            if let Some(root) = page.select(&selector).next() {
                debug!(root = %css, "Selected article root");
                return Ok(Some(root));
            }
        }
        Ok(None)
    }
}

impl ArticleExtractor for HtmlArticleExtractor {
    fn extract(&self, html: &str) -> Result<Article, QuellError> {
        let page = Html::parse_document(html);
        let title = first_text(&page, "title")?.or(first_text(&page, "h1")?);

        let root = self.find_root(&page)?.ok_or(QuellError::EmptyArticle)?;

        let strip = parse_selector(&self.strip)?;
        let stripped: HashSet<_> = root.select(&strip).map(|el| el.id()).collect();
        let is_stripped = |el: &ElementRef<'_>| {
            stripped.contains(&el.id()) || el.ancestors().any(|a| stripped.contains(&a.id()))
        };

        let paragraphs = parse_selector(&self.paragraphs)?;
        let mut taken = HashSet::new();
        let mut blocks = Vec::new();
        for element in root.select(&paragraphs) {
            if is_stripped(&element) || element.ancestors().any(|a| taken.contains(&a.id())) {
                continue;
            }
            let text = collapse_whitespace(&element.text().collect::<String>());
            if !text.is_empty() {
                taken.insert(element.id());
                blocks.push(text);
            }
        }

        let text = if blocks.is_empty() {
            let mut buf = String::new();
            for node in root.descendants() {
                let Some(fragment) = node.value().as_text() else {
                    continue;
                };
                if node.ancestors().any(|a| stripped.contains(&a.id())) {
                    continue;
                }
                buf.push_str(fragment);
                buf.push(' ');
            }
            collapse_whitespace(&buf)
        } else {
            blocks.join("\n\n")
        };

        if text.is_empty() {
            return Err(QuellError::EmptyArticle);
        }
        Ok(Article { title, text })
    }
}

fn parse_selector(css: &str) -> Result<Selector, QuellError> {
    Selector::parse(css).map_err(|e| QuellError::Selector(format!("{css}: {e:?}")))
}

fn first_text(page: &Html, css: &str) -> Result<Option<String>, QuellError> {
    let selector = parse_selector(css)?;
    Ok(page
        .select(&selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty()))
}
