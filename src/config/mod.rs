//! Configuration module for Depth-Crawler
//!
//! A crawl is configured entirely from the command line. This module holds
//! the immutable [`CrawlConfig`], the value parsers used for the positional
//! arguments, and the validation applied before any crawling begins.
//!
//! # Example
//!
//! ```
//! use depth_crawler::config::{validate, CrawlConfig};
//!
//! let config = CrawlConfig::new("https://example.com/", 5, 2, true, "2025-01-01_00-00-00");
//! assert!(validate(&config).is_ok());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_workers, CrawlConfig, DEFAULT_FETCH_TIMEOUT, DEFAULT_OUTPUT_ROOT,
    DEFAULT_SHUTDOWN_GRACE, MIN_WORKERS,
};

// Re-export parser functions
pub use parser::{generate_run_id, parse_bool_flag, parse_non_negative};
pub use validation::validate;
