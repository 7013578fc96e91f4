// ABOUTME: Article-tag extraction strategy.
// ABOUTME: Joins substantial, non-comment paragraphs found inside the first <article> element.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::filters::is_comment_text;
use super::ExtractionStrategy;
use crate::dom::element_text;

/// Paragraphs must be longer than this many characters to count.
const MIN_PARAGRAPH_CHARS: usize = 50;

static ARTICLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Collects paragraph text from the first `<article>` in the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleTagStrategy;

impl ExtractionStrategy for ArticleTagStrategy {
    fn name(&self) -> &'static str {
        "article-tag"
    }

    fn extract(&self, doc: &Html) -> Option<String> {
        let article = doc.select(&ARTICLE_SELECTOR).next()?;

        let paragraphs: Vec<String> = article
            .select(&PARAGRAPH_SELECTOR)
            .map(|p| element_text(&p))
            .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
            .filter(|text| !is_comment_text(text))
            .collect();

        if paragraphs.is_empty() {
            return None;
        }
        Some(paragraphs.join("\n\n"))
    }
}
