// ABOUTME: The Client struct that runs one scrape cycle: listing fetch, stub selection, article enrichment.
// ABOUTME: Provides scrape() for raw results and scrape_and_save() which never fails outward.

use std::thread;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::dom::truncate_chars;
use crate::error::ScrapeError;
use crate::extractors::ContentExtractor;
use crate::listing::ListingExtractor;
use crate::models::{ArticleRecord, ArticleStub};
use crate::options::{ClientBuilder, Options};
use crate::resource::{Fetcher, HttpFetcher};
use crate::storage::RecordStore;

/// Outcome of [`Client::scrape_and_save`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedRun {
    pub records: Vec<ArticleRecord>,
    /// True only when the store accepted the records.
    pub saved: bool,
}

/// Sequential blog scraper.
pub struct Client {
    opts: Options,
    fetcher: Box<dyn Fetcher>,
    listing: ListingExtractor,
    content: ContentExtractor,
}

impl Client {
    /// Create a new ClientBuilder for configuring a Client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a Client; without a fetcher an [`HttpFetcher`] is built from the options.
    pub fn new(opts: Options, fetcher: Option<Box<dyn Fetcher>>) -> Result<Self, ScrapeError> {
        let fetcher: Box<dyn Fetcher> = match fetcher {
            Some(f) => f,
            None => Box::new(HttpFetcher::new(&opts.user_agent)?),
        };
        let listing = ListingExtractor::new(
            opts.resolved_origin(),
            opts.listing_url.clone(),
            opts.candidate_cap,
        );
        let content = ContentExtractor::new(opts.max_content_len);

        Ok(Self {
            opts,
            fetcher,
            listing,
            content,
        })
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Runs one cycle and returns the selected records.
    ///
    /// Only a listing fetch failure is returned as an error; article failures
    /// become error-message content on that record.
    pub fn scrape(&self) -> Result<Vec<ArticleRecord>, ScrapeError> {
        let listing_url = &self.opts.listing_url;
        info!(url = %listing_url, "fetching listing page");

        let page = self.fetcher.fetch(listing_url, None)?;
        let stubs = self.listing.extract(&page.text());
        info!(stubs = stubs.len(), "extracted listing stubs");

        let selected = self.opts.selection.select(stubs, self.opts.target_count);
        debug!(
            selected = selected.len(),
            policy = %self.opts.selection,
            "selected listing window"
        );

        let mut records = Vec::with_capacity(selected.len());
        let mut fetched_any = false;
        for stub in selected {
            let content = if self.needs_fetch(&stub) {
                if fetched_any && !self.opts.request_delay.is_zero() {
                    thread::sleep(self.opts.request_delay);
                }
                fetched_any = true;
                info!(title = %stub.title, url = %stub.url, "scraping article");
                self.article_content(&stub.url)
            } else {
                stub.excerpt.clone()
            };
            let mut record = ArticleRecord::from_stub(
                stub,
                content,
                self.opts.source_name.clone(),
                Utc::now(),
            );
            // Excerpt and marker fallbacks skip the extractor's cap.
            if record.content_chars() > self.opts.max_content_len {
                record.content = truncate_chars(&record.content, self.opts.max_content_len);
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Runs one cycle and saves the records, converting every failure to logs.
    ///
    /// A listing failure returns no records and leaves storage untouched.
    pub fn scrape_and_save(&self, store: &dyn RecordStore) -> SavedRun {
        let records = match self.scrape() {
            Ok(records) => records,
            Err(err) => {
                error!(error = %err, "scrape aborted");
                return SavedRun::default();
            }
        };

        let saved = match store.save(&records) {
            Ok(()) => {
                info!(count = records.len(), "saved records");
                true
            }
            Err(err) => {
                error!(error = %err, "failed to save records");
                false
            }
        };
        SavedRun { records, saved }
    }

    fn needs_fetch(&self, stub: &ArticleStub) -> bool {
        !stub.url.is_empty() && stub.url != self.opts.listing_url
    }

    /// Fetches and extracts one article; never fails.
    fn article_content(&self, url: &str) -> String {
        match self.fetcher.fetch(url, Some(self.opts.article_timeout)) {
            Ok(page) => self.content.extract(&page.text(), url),
            Err(err) => {
                warn!(url, error = %err, "article fetch failed");
                self.content.error_message(url, &err)
            }
        }
    }
}
