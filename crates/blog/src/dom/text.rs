// ABOUTME: Text and attribute helpers over scraper element references.
// ABOUTME: Whitespace normalization, char-safe truncation, and class-substring predicates.

use scraper::ElementRef;

/// Normalize whitespace in text
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collects all descendant text of an element with whitespace collapsed.
pub fn element_text(element: &ElementRef) -> String {
    normalize_spaces(&element.text().collect::<String>())
}

/// Truncates to at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Returns true if the lowercased `class` attribute contains any of `needles`.
///
/// Needles must already be lowercase. Elements without a class never match.
pub fn class_contains(element: &ElementRef, needles: &[&str]) -> bool {
    match element.value().attr("class") {
        Some(class_attr) => {
            let class_lower = class_attr.to_lowercase();
            needles.iter().any(|needle| class_lower.contains(needle))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        let sel = Selector::parse(css).unwrap();
        doc.select(&sel).next().unwrap()
    }

    #[test]
    fn test_normalize_spaces() {
        assert_eq!(normalize_spaces("  a \n\t b  "), "a b");
        assert_eq!(normalize_spaces(""), "");
    }

    #[test]
    fn test_element_text_joins_inline_children() {
        let doc = Html::parse_fragment("<p>Hello <b>bold</b>\n  world</p>");
        assert_eq!(element_text(&first(&doc, "p")), "Hello bold world");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_class_contains_compound() {
        let doc = Html::parse_fragment(r#"<div class="Blog-Post-Card featured">x</div>"#);
        let el = first(&doc, "div");
        assert!(class_contains(&el, &["post"]));
        assert!(class_contains(&el, &["missing", "blog"]));
        assert!(!class_contains(&el, &["article"]));
    }

    #[test]
    fn test_class_contains_no_class() {
        let doc = Html::parse_fragment("<div>x</div>");
        assert!(!class_contains(&first(&doc, "div"), &["post"]));
    }
}
