// ABOUTME: Configuration for the blog scraper including SelectionPolicy, Options, and ClientBuilder.
// ABOUTME: ClientBuilder provides a fluent API for constructing Client instances with custom settings.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::client::Client;
use crate::extractors::DEFAULT_MAX_CONTENT_LEN;
use crate::listing::DEFAULT_CANDIDATE_CAP;
use crate::resource::Fetcher;

pub const DEFAULT_LISTING_URL: &str = "https://beyondchats.com/blogs";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_SOURCE_NAME: &str = "BeyondChats";
pub const DEFAULT_TARGET_COUNT: usize = 5;

/// Which end of the discovered listing to keep.
///
/// Listing pages are assumed newest-first, so `Oldest` keeps the tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    #[default]
    Oldest,
    Newest,
}

impl SelectionPolicy {
    /// Keeps at most `count` items from the tail (`Oldest`) or head (`Newest`).
    pub fn select<T>(&self, mut items: Vec<T>, count: usize) -> Vec<T> {
        if items.len() <= count {
            return items;
        }
        match self {
            SelectionPolicy::Oldest => items.split_off(items.len() - count),
            SelectionPolicy::Newest => {
                items.truncate(count);
                items
            }
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SelectionPolicy::Oldest => "oldest",
            SelectionPolicy::Newest => "newest",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oldest" | "last" | "tail" => Ok(SelectionPolicy::Oldest),
            "newest" | "first" | "head" => Ok(SelectionPolicy::Newest),
            other => Err(format!(
                "unknown selection policy '{}' (expected oldest or newest)",
                other
            )),
        }
    }
}

/// Extracts the base domain (scheme + host + optional port) from a URL.
pub fn base_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    match parsed.port() {
        Some(port) => Some(format!("{}://{}:{}", parsed.scheme(), host, port)),
        None => Some(format!("{}://{}", parsed.scheme(), host)),
    }
}

/// Configuration options for a scrape run.
#[derive(Debug, Clone)]
pub struct Options {
    pub listing_url: String,
    /// Resolves relative article links. Derived from `listing_url` when unset.
    pub origin: Option<String>,
    pub target_count: usize,
    pub candidate_cap: usize,
    pub user_agent: String,
    pub article_timeout: Duration,
    pub request_delay: Duration,
    pub max_content_len: usize,
    pub selection: SelectionPolicy,
    pub source_name: String,
    /// Downstream API location; carried through configuration but not called.
    pub api_base_url: String,
}

impl Options {
    /// The configured origin, or the listing URL's base domain.
    pub fn resolved_origin(&self) -> String {
        self.origin
            .clone()
            .or_else(|| base_domain(&self.listing_url))
            .unwrap_or_else(|| self.listing_url.clone())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            origin: None,
            target_count: DEFAULT_TARGET_COUNT,
            candidate_cap: DEFAULT_CANDIDATE_CAP,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            article_timeout: Duration::from_secs(15),
            request_delay: Duration::from_secs(1),
            max_content_len: DEFAULT_MAX_CONTENT_LEN,
            selection: SelectionPolicy::Oldest,
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
pub struct ClientBuilder {
    opts: Options,
    fetcher: Option<Box<dyn Fetcher>>,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
            fetcher: None,
        }
    }

    /// Start from an existing set of options.
    pub fn options(mut self, opts: Options) -> Self {
        self.opts = opts;
        self
    }

    /// Set the listing page URL.
    pub fn listing_url(mut self, url: impl Into<String>) -> Self {
        self.opts.listing_url = url.into();
        self
    }

    /// Override the origin used to resolve relative links.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.opts.origin = Some(origin.into());
        self
    }

    /// Set how many records a run keeps.
    pub fn target_count(mut self, count: usize) -> Self {
        self.opts.target_count = count;
        self
    }

    /// Set how many listing candidates are examined.
    pub fn candidate_cap(mut self, cap: usize) -> Self {
        self.opts.candidate_cap = cap;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Set the per-article fetch timeout.
    pub fn article_timeout(mut self, timeout: Duration) -> Self {
        self.opts.article_timeout = timeout;
        self
    }

    /// Set the pause between article fetches.
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.opts.request_delay = delay;
        self
    }

    /// Set the content length cap in characters.
    pub fn max_content_len(mut self, max_len: usize) -> Self {
        self.opts.max_content_len = max_len;
        self
    }

    /// Set which end of the listing is kept.
    pub fn selection(mut self, policy: SelectionPolicy) -> Self {
        self.opts.selection = policy;
        self
    }

    /// Set the source identifier stamped on every record.
    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.opts.source_name = name.into();
        self
    }

    /// Set the downstream API base URL.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.opts.api_base_url = url.into();
        self
    }

    /// Use a custom fetcher instead of the default HTTP one.
    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, crate::error::ScrapeError> {
        Client::new(self.opts, self.fetcher)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
