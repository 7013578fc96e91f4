// ABOUTME: Removes non-content subtrees from a parsed document before text extraction.
// ABOUTME: Strips chrome tags (script, nav, footer...) and comment/reply/discussion containers.

use ego_tree::NodeId;
use scraper::{ElementRef, Html};

use super::text::class_contains;

/// Tags whose whole subtree never contributes article text.
pub const NON_CONTENT_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "iframe", "form", "button",
];

/// Substrings in class attributes that mark reader discussion areas.
pub const DISCUSSION_CLASS_MARKERS: &[&str] = &["comment", "reply", "discussion"];

/// Returns true if the element should be detached during cleaning.
///
/// `html` and `body` are never removed on class alone.
fn is_non_content(element: &ElementRef) -> bool {
    let tag = element.value().name();
    if NON_CONTENT_TAGS.contains(&tag) {
        return true;
    }
    if tag == "html" || tag == "body" {
        return false;
    }
    class_contains(element, DISCUSSION_CLASS_MARKERS)
}

/// Detaches non-content elements from the document tree.
///
/// Returns the number of subtrees removed (nested matches inside an already
/// removed subtree are not counted).
pub fn strip_non_content(doc: &mut Html) -> usize {
    let mut doomed: Vec<NodeId> = Vec::new();
    let mut edge = doc.tree.root().traverse();

    while let Some(step) = edge.next() {
        if let ego_tree::iter::Edge::Open(node) = step {
            if let Some(element) = ElementRef::wrap(node) {
                if is_non_content(&element) {
                    doomed.push(node.id());
                    // Skip the subtree; it goes with its root.
                    for inner in edge.by_ref() {
                        if let ego_tree::iter::Edge::Close(closed) = inner {
                            if closed.id() == node.id() {
                                break;
                            }
                        }
                    }
                }
            }
        }
    }

    for id in &doomed {
        if let Some(mut node) = doc.tree.get_mut(*id) {
            node.detach();
        }
    }

    doomed.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    fn count(doc: &Html, css: &str) -> usize {
        let sel = Selector::parse(css).unwrap();
        doc.select(&sel).count()
    }

    #[test]
    fn test_strips_chrome_tags() {
        let mut doc = Html::parse_document(
            r#"<html><head><style>p{}</style></head><body>
            <header><p>Site header</p></header>
            <nav><a href="/">Home</a></nav>
            <p>Body text</p>
            <form><button>Go</button></form>
            <script>var x = 1;</script>
            <footer>Footer</footer>
            </body></html>"#,
        );
        let removed = strip_non_content(&mut doc);
        assert_eq!(removed, 6);
        assert_eq!(count(&doc, "header, nav, form, button, script, footer, style"), 0);
        assert_eq!(count(&doc, "p"), 1);
    }

    #[test]
    fn test_strips_discussion_containers() {
        let mut doc = Html::parse_document(
            r#"<body><article><p>Keep me</p></article>
            <div class="wp-Comments-area"><p>John says: great post!</p></div>
            <section class="reply-box"><p>Reply here</p></section>
            <div class="community-discussion"><p>Thread</p></div></body>"#,
        );
        strip_non_content(&mut doc);
        assert_eq!(count(&doc, "p"), 1);
        let text: String = doc.root_element().text().collect();
        assert!(text.contains("Keep me"));
        assert!(!text.contains("says:"));
    }

    #[test]
    fn test_body_with_comment_class_survives() {
        let mut doc =
            Html::parse_document(r#"<html><body class="comments-open"><p>Text</p></body></html>"#);
        strip_non_content(&mut doc);
        assert_eq!(count(&doc, "p"), 1);
    }
}
