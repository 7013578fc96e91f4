// ABOUTME: Content extraction for single article pages via an ordered cascade of strategies.
// ABOUTME: Defines the ExtractionStrategy trait, the Cascade runner, and the ContentExtractor facade.

//! Article body extraction.
//!
//! The document is cleaned of chrome and discussion areas first, then each
//! strategy is tried in order until one returns at least
//! [`SUFFICIENT_CHARS`] characters. If none does, the longest answer is kept
//! when it reaches [`MIN_ACCEPT_CHARS`]; otherwise a fixed "insufficient
//! content" message naming the URL is returned.
//!
//! Submodules:
//! - `article`: paragraphs inside the first `<article>`.
//! - `named`: well-known CMS content wrapper classes.
//! - `paragraphs`: document-wide prose heuristics.
//! - `filters`: comment, boilerplate and attribution text filters.

pub mod article;
pub mod filters;
pub mod named;
pub mod paragraphs;

use scraper::Html;
use tracing::debug;

use crate::dom::{strip_non_content, truncate_chars};

pub use article::ArticleTagStrategy;
pub use named::NamedContainerStrategy;
pub use paragraphs::HeuristicParagraphStrategy;

/// A strategy result at least this long stops the cascade.
pub const SUFFICIENT_CHARS: usize = 300;

/// The best result must reach this length to be used at all.
pub const MIN_ACCEPT_CHARS: usize = 200;

/// Default cap on returned content, in characters.
pub const DEFAULT_MAX_CONTENT_LEN: usize = 15_000;

/// One way of locating article text in a cleaned document.
pub trait ExtractionStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Returns the extracted text, or `None` when the strategy found nothing usable.
    fn extract(&self, doc: &Html) -> Option<String>;
}

/// Text chosen by the cascade along with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub strategy: &'static str,
    pub text: String,
}

/// Ordered, short-circuiting list of strategies.
pub struct Cascade {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Cascade {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Article tag, then named containers, then heuristic paragraphs.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(ArticleTagStrategy),
            Box::new(NamedContainerStrategy),
            Box::new(HeuristicParagraphStrategy),
        ])
    }

    /// Runs strategies in order against an already-cleaned document.
    pub fn run(&self, doc: &Html) -> Option<Extracted> {
        let mut best: Option<(usize, Extracted)> = None;

        for strategy in &self.strategies {
            let text = match strategy.extract(doc) {
                Some(text) if !text.trim().is_empty() => text,
                _ => continue,
            };
            let len = text.chars().count();
            debug!(strategy = strategy.name(), chars = len, "strategy produced text");

            let extracted = Extracted {
                strategy: strategy.name(),
                text,
            };
            if len >= SUFFICIENT_CHARS {
                return Some(extracted);
            }
            if best.as_ref().map_or(true, |(best_len, _)| len > *best_len) {
                best = Some((len, extracted));
            }
        }

        best.filter(|(len, _)| *len >= MIN_ACCEPT_CHARS)
            .map(|(_, extracted)| extracted)
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Cascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("Cascade").field("strategies", &names).finish()
    }
}

/// Message returned when no strategy finds enough text.
pub fn insufficient_content_message(source_url: &str) -> String {
    format!(
        "Insufficient content extracted from {}; the page possibly requires script execution to render.",
        source_url
    )
}

/// Message returned when fetching or reading an article fails.
pub fn extraction_error_message(source_url: &str, detail: impl std::fmt::Display) -> String {
    format!("Error extracting content from {}: {}", source_url, detail)
}

/// Cleans an article page and runs the cascade over it.
#[derive(Debug)]
pub struct ContentExtractor {
    cascade: Cascade,
    max_len: usize,
}

impl ContentExtractor {
    pub fn new(max_len: usize) -> Self {
        Self::with_cascade(Cascade::standard(), max_len)
    }

    pub fn with_cascade(cascade: Cascade, max_len: usize) -> Self {
        Self { cascade, max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Extracts the article body as plain text, at most `max_len` characters.
    ///
    /// Always returns a string: when nothing usable is found the result is
    /// the insufficient-content message for `source_url`.
    pub fn extract(&self, html: &str, source_url: &str) -> String {
        let mut doc = Html::parse_document(html);
        let removed = strip_non_content(&mut doc);
        debug!(url = source_url, removed, "stripped non-content elements");

        let text = match self.cascade.run(&doc) {
            Some(extracted) => {
                debug!(url = source_url, strategy = extracted.strategy, "content extracted");
                extracted.text
            }
            None => {
                debug!(url = source_url, "no strategy produced enough text");
                insufficient_content_message(source_url)
            }
        };

        truncate_chars(&text, self.max_len)
    }

    /// Truncated error message for a failed fetch of `source_url`.
    pub fn error_message(&self, source_url: &str, detail: impl std::fmt::Display) -> String {
        truncate_chars(&extraction_error_message(source_url, detail), self.max_len)
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTENT_LEN)
    }
}

/// Extracts the main text of an article page with the standard cascade.
pub fn extract_content(html: &str, source_url: &str, max_len: usize) -> String {
    ContentExtractor::new(max_len).extract(html, source_url)
}
