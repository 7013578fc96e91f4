// ABOUTME: Resource fetching for listing and article pages.
// ABOUTME: Defines the Fetcher trait and a blocking reqwest implementation with charset decoding.

use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use crate::error::ScrapeError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as UTF-8 text, using the charset from the content-type header if present.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Retrieves page bytes for a URL.
///
/// Implementations must treat non-2xx responses as errors.
pub trait Fetcher {
    /// Fetches `url`; `timeout` of `None` waits indefinitely.
    fn fetch(&self, url: &str, timeout: Option<Duration>) -> Result<FetchResult, ScrapeError>;
}

/// Blocking HTTP fetcher sending a fixed User-Agent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, ScrapeError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| {
                ScrapeError::fetch(
                    "",
                    "BuildClient",
                    Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                )
            })?;
        Ok(Self { client })
    }

    /// Wrap an already configured blocking client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, timeout: Option<Duration>) -> Result<FetchResult, ScrapeError> {
        validate_url(url)?;

        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().map_err(|e| map_transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("unexpected status {}", status)),
            ));
        }

        if let Some(len) = response.content_length() {
            if len as usize > MAX_CONTENT_LENGTH {
                return Err(ScrapeError::fetch(
                    url,
                    "Fetch",
                    Some(anyhow::anyhow!("content too large")),
                ));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.bytes().map_err(|e| map_transport_error(url, e))?;
        if body.len() > MAX_CONTENT_LENGTH {
            return Err(ScrapeError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }

        debug!(url, status = status.as_u16(), bytes = body.len(), "fetched");

        Ok(FetchResult {
            status: status.as_u16(),
            url: url.to_string(),
            final_url,
            content_type,
            body,
        })
    }
}

fn validate_url(url: &str) -> Result<(), ScrapeError> {
    if url.is_empty() {
        return Err(ScrapeError::invalid_url(url, "Fetch", None));
    }

    let parsed = url::Url::parse(url).map_err(|e| {
        ScrapeError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(ScrapeError::invalid_url(
            url,
            "Fetch",
            Some(anyhow::anyhow!("scheme must be http or https")),
        )),
    }
}

fn map_transport_error(url: &str, err: reqwest::Error) -> ScrapeError {
    if err.is_timeout() {
        ScrapeError::timeout(url, "Fetch", Some(anyhow::anyhow!("request timed out: {}", err)))
    } else {
        ScrapeError::fetch(url, "Fetch", Some(anyhow::anyhow!("request failed: {}", err)))
    }
}

/// Bytes scanned for a `<meta>` charset declaration.
const META_SNIFF_LEN: usize = 1024;

/// Decodes a page body. The Content-Type charset wins, then a `<meta>`
/// declaration near the top of the document, then detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let declared = content_type
        .and_then(extract_charset)
        .or_else(|| meta_charset(body))
        .and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes()));

    let encoding = declared.unwrap_or_else(|| {
        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(body, true);
        detector.guess(None, true)
    });
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Charset parameter of a Content-Type value, lowercased and unquoted.
fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .to_lowercase()
        .split(';')
        .find_map(|part| part.trim().strip_prefix("charset=").map(str::to_string))
        .map(|charset| charset.trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|charset| !charset.is_empty())
}

/// Finds `<meta charset=..>` or an `http-equiv` content charset in the head.
fn meta_charset(body: &[u8]) -> Option<String> {
    let head = &body[..body.len().min(META_SNIFF_LEN)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    head.match_indices("<meta").find_map(|(start, _)| {
        let tag = &head[start..];
        let tag = &tag[..tag.find('>').unwrap_or(tag.len())];
        let value = &tag[tag.find("charset=")? + "charset=".len()..];
        let label: String = value
            .trim_start_matches(['"', '\''])
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
            .collect();
        (!label.is_empty()).then_some(label)
    })
}
