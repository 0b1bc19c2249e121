//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeout classification
//! - HTML parsing and link extraction
//! - Child selection under the fan-out cap and uniqueness policy
//! - Depth-by-depth scheduling on a bounded worker pool
//! - Graceful shutdown and overall run coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;
mod selection;
mod shutdown;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_url, Fetch, FetchResult, HttpFetcher};
pub use parser::extract_raw_hrefs;
pub use scheduler::{failure_placeholder, Scheduler, TIMEOUT_PLACEHOLDER};
pub use selection::ChildSelector;
pub use shutdown::ShutdownSignal;

pub use crate::output::CrawlReport;
