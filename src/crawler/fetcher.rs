//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building an HTTP client that presents itself like a desktop browser
//! - GET requests with redirect following and a per-request deadline
//! - Classifying failures into timeouts and everything else
//! - Handing the body to the parser for raw link extraction

use crate::crawler::parser::extract_raw_hrefs;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA, REFERER,
};
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;

/// User agent sent with every request
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Maximum number of redirects followed for one request
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Page body retrieved
    Success {
        /// Page body, treated as HTML whatever its Content-Type
        body: String,
        /// Raw `href` values of every anchor, in document order
        links: Vec<String>,
    },

    /// The request deadline was exceeded
    Timeout {
        /// Error description
        error: String,
    },

    /// Any other failure (connection, TLS, redirect, non-2xx status, ...)
    Failed {
        /// Error description
        error: String,
    },
}

/// Retrieves a page and the raw links it contains
///
/// Implementations must be cheap to share between worker tasks and must
/// report every problem through [`FetchResult`] rather than panicking.
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult> + Send;
}

/// [`Fetch`] implementation backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(timeout)?,
        })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with browser-like identification
///
/// # Arguments
///
/// * `timeout` - Deadline for a whole request, also used for connecting
///
/// # Example
///
/// ```no_run
/// use depth_crawler::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(Duration::from_secs(15)).unwrap();
/// ```
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));

    Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and extracts its raw links
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Deadline exceeded (connect or read) | `Timeout` |
/// | Non-2xx status after redirects | `Failed` (`HTTP <status>`) |
/// | Any other transport error | `Failed` |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::Failed {
            error: format!("HTTP {}", status),
        };
    }

    match response.text().await {
        Ok(body) => {
            let links = extract_raw_hrefs(&body);
            FetchResult::Success { body, links }
        }
        Err(e) => classify_error(e),
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::Timeout {
            error: e.to_string(),
        }
    } else {
        FetchResult::Failed {
            error: e.to_string(),
        }
    }
}
