// ABOUTME: Paragraph-level text filters shared by the content extraction strategies.
// ABOUTME: Detects comment indicators, legal/cookie boilerplate, and attribution prefixes.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

/// Phrases that mark reader comments rather than article prose.
pub const COMMENT_INDICATORS: &[&str] = &["reply", "comment", "leave a comment", "says:", "wrote:"];

/// Phrases that mark cookie banners, legal notices and footers.
pub const BOILERPLATE_MARKERS: &[&str] = &[
    "cookie",
    "privacy",
    "terms",
    "copyright",
    "©",
    "all rights reserved",
];

/// Prefixes of bylines and comment headers.
pub const ATTRIBUTION_PREFIXES: &[&str] = &["reply", "comment", "posted by", "written by"];

static COMMENT_MATCHER: Lazy<AhoCorasick> =
    Lazy::new(|| AhoCorasick::new(COMMENT_INDICATORS).unwrap());
static BOILERPLATE_MATCHER: Lazy<AhoCorasick> =
    Lazy::new(|| AhoCorasick::new(BOILERPLATE_MARKERS).unwrap());

/// Returns true if the lowercased text contains a comment indicator.
pub fn is_comment_text(text: &str) -> bool {
    COMMENT_MATCHER.is_match(&text.to_lowercase())
}

/// Returns true if the lowercased text contains a boilerplate marker.
pub fn is_boilerplate(text: &str) -> bool {
    BOILERPLATE_MATCHER.is_match(&text.to_lowercase())
}

/// Returns true if the lowercased text starts with an attribution prefix.
pub fn has_attribution_prefix(text: &str) -> bool {
    let lower = text.to_lowercase();
    ATTRIBUTION_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}
