// ABOUTME: Named-content-container extraction strategy.
// ABOUTME: Looks for divs whose class names match well-known CMS content wrappers, in priority order.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::ExtractionStrategy;
use crate::dom::{class_contains, element_text};

/// Class-name substrings of common content wrappers, highest priority first.
pub const CONTENT_CONTAINER_MARKERS: &[&str] = &[
    "post-content",
    "entry-content",
    "article-body",
    "blog-post",
    "content-area",
    "post-body",
];

/// Descendants must be longer than this many characters to count.
const MIN_BLOCK_CHARS: usize = 30;

/// A container needs more than this many qualifying blocks.
const MIN_BLOCKS: usize = 3;

static DIV_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div").unwrap());
static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p, h2, h3, h4").unwrap());

/// Joins paragraph and subheading text from the best-known content container.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamedContainerStrategy;

impl NamedContainerStrategy {
    fn blocks_in(container: &scraper::ElementRef) -> Vec<String> {
        container
            .select(&BLOCK_SELECTOR)
            .map(|el| element_text(&el))
            .filter(|text| text.chars().count() > MIN_BLOCK_CHARS)
            .collect()
    }
}

impl ExtractionStrategy for NamedContainerStrategy {
    fn name(&self) -> &'static str {
        "named-container"
    }

    fn extract(&self, doc: &Html) -> Option<String> {
        for marker in CONTENT_CONTAINER_MARKERS {
            for container in doc.select(&DIV_SELECTOR) {
                if !class_contains(&container, &[*marker]) {
                    continue;
                }
                let blocks = Self::blocks_in(&container);
                if blocks.len() > MIN_BLOCKS {
                    return Some(blocks.join("\n\n"));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::fixtures::{P1, P2, P3, P4};

    #[test]
    fn joins_paragraphs_and_subheadings() {
        let html = format!(
            r#"<div class="single entry-content"><p>{P1}</p><h2>Why fast response time matters most</h2>
            <p>{P2}</p><h5>Ignored heading level that is long</h5><p>{P3}</p><p>ok</p></div>"#
        );
        let doc = Html::parse_document(&html);
        assert_eq!(
            NamedContainerStrategy.extract(&doc),
            Some(format!("{P1}\n\nWhy fast response time matters most\n\n{P2}\n\n{P3}"))
        );
    }

    #[test]
    fn requires_more_than_three_blocks() {
        let html = format!(r#"<div class="post-content"><p>{P1}</p><p>{P2}</p><p>{P3}</p></div>"#);
        let doc = Html::parse_document(&html);
        assert_eq!(NamedContainerStrategy.extract(&doc), None);
    }

    #[test]
    fn marker_priority_beats_document_order() {
        let html = format!(
            r#"<div class="post-body"><p>{P4}</p><p>{P4}</p><p>{P4}</p><p>{P4}</p></div>
            <div class="post-content"><p>{P1}</p><p>{P2}</p><p>{P3}</p><p>{P4}</p></div>"#
        );
        let doc = Html::parse_document(&html);
        let text = NamedContainerStrategy.extract(&doc).unwrap();
        assert!(text.starts_with(P1));
    }

    #[test]
    fn skips_thin_container_for_next_match() {
        let html = format!(
            r#"<div class="post-content-header"><p>{P1}</p></div>
            <div class="post-content"><p>{P1}</p><p>{P2}</p><p>{P3}</p><p>{P4}</p></div>"#
        );
        let doc = Html::parse_document(&html);
        let text = NamedContainerStrategy.extract(&doc).unwrap();
        assert!(text.ends_with(P4));
    }
}
