//! Depth-Crawler: a bounded, depth-limited web crawler
//!
//! This crate fetches pages concurrently starting from a single URL, bounds
//! the number of children followed per page, optionally deduplicates URLs
//! across the whole run, and writes every page plus its selected children
//! to a per-run output tree.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Depth-Crawler operations
///
/// Per-URL problems never surface here; they are recorded as
/// [`state::FailureRecord`]s and the crawl continues.
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid start URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid boolean '{0}' (use true/false)")]
    InvalidFlag(String),

    #[error("Invalid integer '{value}': {reason}")]
    InvalidCount { value: String, reason: String },
}

/// Result type alias for Depth-Crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{run_crawl, Coordinator, CrawlReport};
pub use state::{FailureKind, FailureRecord, FetchStatus, PageOutcome};
pub use url::{clean_raw_href, is_fetchable, normalize, resolve};
