// ABOUTME: Main library entry point for the blog scraper.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, Options, extractors, models, and collaborators.

//! Blog scraper - finds article entries on a blog listing page and extracts
//! each article's main text from arbitrary HTML.
//!
//! The two extractors are pure functions over HTML; fetching and storage are
//! collaborators behind the [`Fetcher`] and [`RecordStore`] traits.
//!
//! # Example
//!
//! ```no_run
//! use digests_blog::{Client, JsonFileStore, ScrapeError};
//!
//! fn main() -> Result<(), ScrapeError> {
//!     let client = Client::builder()
//!         .listing_url("https://beyondchats.com/blogs")
//!         .target_count(5)
//!         .build()?;
//!     let run = client.scrape_and_save(&JsonFileStore::default());
//!     println!("scraped {} articles (saved: {})", run.records.len(), run.saved);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod listing;
pub mod models;
pub mod options;
pub mod resource;
pub mod storage;

pub use crate::client::{Client, SavedRun};
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::extractors::{
    extract_content, Cascade, ContentExtractor, ExtractionStrategy, Extracted,
    DEFAULT_MAX_CONTENT_LEN,
};
pub use crate::listing::{extract_stubs, resolve_url, ListingExtractor};
pub use crate::models::{ArticleRecord, ArticleStub, EXTRACTION_FAILED};
pub use crate::options::{base_domain, ClientBuilder, Options, SelectionPolicy};
pub use crate::resource::{FetchResult, Fetcher, HttpFetcher};
pub use crate::storage::{JsonFileStore, RecordStore, DEFAULT_OUTPUT_FILE};
