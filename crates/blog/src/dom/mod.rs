// ABOUTME: DOM helpers shared by the listing and content extractors.
// ABOUTME: Provides text normalization, class-substring predicates, and non-content stripping.

//! DOM utilities for HTML document inspection and cleaning.
//!
//! Class matching here is plain substring containment over the lowercased
//! `class` attribute, so compound names like `blog-post-card` still match
//! `post`.

pub mod cleaners;
pub mod text;

pub use cleaners::strip_non_content;
pub use text::{class_contains, element_text, normalize_spaces, truncate_chars};
