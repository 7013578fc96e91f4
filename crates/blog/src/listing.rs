// ABOUTME: Listing page extraction: finds article entries on a blog index page.
// ABOUTME: Produces ArticleStubs (title, url, excerpt, date) from heuristically chosen container elements.

use chrono::Local;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::dom::{class_contains, element_text, truncate_chars};
use crate::error::ScrapeError;
use crate::models::ArticleStub;

/// Class-name substrings that mark a listing entry container.
pub const CANDIDATE_CLASS_MARKERS: &[&str] = &["post", "article", "blog"];

/// Maximum excerpt length in characters.
pub const MAX_EXCERPT_CHARS: usize = 500;

/// Default number of candidates examined per listing page.
pub const DEFAULT_CANDIDATE_CAP: usize = 10;

static CONTAINER_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("article, div").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1, h2, h3, h4").unwrap());
static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Extracts article stubs from a blog listing page.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    origin: String,
    listing_url: String,
    candidate_cap: usize,
}

impl ListingExtractor {
    /// `origin` resolves relative links; unresolvable links fall back to `listing_url`.
    pub fn new(
        origin: impl Into<String>,
        listing_url: impl Into<String>,
        candidate_cap: usize,
    ) -> Self {
        Self {
            origin: origin.into(),
            listing_url: listing_url.into(),
            candidate_cap,
        }
    }

    /// Returns stubs in document order, skipping candidates that yield no title.
    pub fn extract(&self, html: &str) -> Vec<ArticleStub> {
        let doc = Html::parse_document(html);
        let candidates = select_candidates(&doc);
        debug!(found = candidates.len(), cap = self.candidate_cap, "listing candidates");

        candidates
            .into_iter()
            .take(self.candidate_cap)
            .enumerate()
            .filter_map(|(idx, candidate)| match self.stub_from(idx, &candidate) {
                Ok(stub) => Some(stub),
                Err(err) => {
                    debug!(index = idx, error = %err, "skipping listing candidate");
                    None
                }
            })
            .collect()
    }

    fn stub_from(&self, idx: usize, candidate: &ElementRef) -> Result<ArticleStub, ScrapeError> {
        let title = candidate_title(idx, candidate);
        if title.is_empty() {
            return Err(ScrapeError::extract(
                &self.listing_url,
                "ListingCandidate",
                Some(anyhow::anyhow!("candidate {} has an empty title", idx + 1)),
            ));
        }

        let url = match candidate_href(candidate) {
            Some(href) => resolve_url(&self.origin, href).unwrap_or_else(|| self.listing_url.clone()),
            None => self.listing_url.clone(),
        };

        let excerpt = candidate
            .select(&PARAGRAPH_SELECTOR)
            .next()
            .map(|p| truncate_chars(&element_text(&p), MAX_EXCERPT_CHARS))
            .unwrap_or_default();

        let published_date = candidate_date(candidate).unwrap_or_else(today);

        Ok(ArticleStub {
            title,
            url,
            excerpt,
            published_date,
        })
    }
}

/// Extracts article stubs, resolving relative links against `origin`.
///
/// Links that cannot be resolved fall back to `origin` itself.
pub fn extract_stubs(html: &str, origin: &str, candidate_cap: usize) -> Vec<ArticleStub> {
    ListingExtractor::new(origin, origin, candidate_cap).extract(html)
}

fn is_link(element: &ElementRef) -> bool {
    element.value().name() == "a"
}

/// `<article>` elements and `<div>`s with post/article/blog classes, else `/blog` links.
fn select_candidates(doc: &Html) -> Vec<ElementRef<'_>> {
    let containers: Vec<ElementRef> = doc
        .select(&CONTAINER_SELECTOR)
        .filter(|el| {
            el.value().name() == "article" || class_contains(el, CANDIDATE_CLASS_MARKERS)
        })
        .collect();
    if !containers.is_empty() {
        return containers;
    }

    doc.select(&LINK_SELECTOR)
        .filter(|a| {
            a.value()
                .attr("href")
                .map(|href| href.to_lowercase().contains("/blog"))
                .unwrap_or(false)
        })
        .collect()
}

fn candidate_title(idx: usize, candidate: &ElementRef) -> String {
    if let Some(heading) = candidate.select(&HEADING_SELECTOR).next() {
        return element_text(&heading);
    }
    if is_link(candidate) {
        return element_text(candidate);
    }
    format!("Article {}", idx + 1)
}

fn candidate_href<'a>(candidate: &ElementRef<'a>) -> Option<&'a str> {
    let link = if is_link(candidate) {
        Some(*candidate)
    } else {
        candidate.select(&LINK_SELECTOR).next()
    };
    link.and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
}

/// First `<time>` or date-classed descendant, in document order.
fn candidate_date(candidate: &ElementRef) -> Option<String> {
    candidate
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "time" || class_contains(el, &["date"]))
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Resolves an href against the site origin.
///
/// Absolute http(s) links pass through unchanged. Anything that does not
/// resolve to an http(s) URL returns `None`.
pub fn resolve_url(origin: &str, href: &str) -> Option<String> {
    let lower = href.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(href.to_string());
    }

    let base = Url::parse(origin).ok()?;
    let joined = base.join(href).ok()?;
    match joined.scheme() {
        "http" | "https" => Some(joined.to_string()),
        _ => None,
    }
}
