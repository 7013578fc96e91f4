// ABOUTME: Data models for scraped blog articles.
// ABOUTME: ArticleStub comes from the listing page; ArticleRecord adds extracted content and capture metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content used when neither extraction nor the excerpt produced any text.
pub const EXTRACTION_FAILED: &str = "Content could not be extracted from this article.";

/// Partial article derived from the listing page only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleStub {
    pub title: String,
    pub url: String,
    pub excerpt: String,
    pub published_date: String,
}

/// A stub enriched with its full extracted body and capture metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub url: String,
    pub excerpt: String,
    pub published_date: String,
    pub content: String,
    pub source: String,
    pub scraped_at: DateTime<Utc>,
}

impl ArticleRecord {
    /// Merges extracted content into a stub.
    ///
    /// Blank content falls back to the excerpt, then to [`EXTRACTION_FAILED`].
    pub fn from_stub(
        stub: ArticleStub,
        content: String,
        source: impl Into<String>,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        let content = if !content.trim().is_empty() {
            content
        } else if !stub.excerpt.trim().is_empty() {
            stub.excerpt.clone()
        } else {
            EXTRACTION_FAILED.to_string()
        };

        Self {
            title: stub.title,
            url: stub.url,
            excerpt: stub.excerpt,
            published_date: stub.published_date,
            content,
            source: source.into(),
            scraped_at,
        }
    }

    /// Length of the content in characters.
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }
}
