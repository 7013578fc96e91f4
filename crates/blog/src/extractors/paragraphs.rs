// ABOUTME: Heuristic paragraph extraction strategy used when no article or known container is found.
// ABOUTME: Keeps long paragraphs that look like prose rather than legal text, bylines, or contact info.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::filters::{has_attribution_prefix, is_boilerplate};
use super::ExtractionStrategy;
use crate::dom::element_text;

/// Paragraphs must be longer than this many characters to count.
const MIN_PARAGRAPH_CHARS: usize = 100;

/// Minimum number of qualifying paragraphs for the strategy to answer.
const MIN_PARAGRAPHS: usize = 3;

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Returns true if a paragraph looks like article prose.
fn is_prose(text: &str) -> bool {
    text.chars().count() > MIN_PARAGRAPH_CHARS
        && !is_boilerplate(text)
        && !has_attribution_prefix(text)
        && !text.contains('@')
}

/// Scans every paragraph in the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicParagraphStrategy;

impl ExtractionStrategy for HeuristicParagraphStrategy {
    fn name(&self) -> &'static str {
        "heuristic-paragraphs"
    }

    fn extract(&self, doc: &Html) -> Option<String> {
        let paragraphs: Vec<String> = doc
            .select(&PARAGRAPH_SELECTOR)
            .map(|p| element_text(&p))
            .filter(|text| is_prose(text))
            .collect();

        if paragraphs.len() < MIN_PARAGRAPHS {
            return None;
        }
        Some(paragraphs.join("\n\n"))
    }
}
