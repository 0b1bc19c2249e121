//! Output module for persisting crawl results
//!
//! This module handles:
//! - Reserving collision-free filenames per depth
//! - Writing page bodies and children lists
//! - Writing the run's failures file
//! - Recording run counters and printing the final summary

mod naming;
mod sink;
pub mod stats;

pub use naming::{hashed_stem, sanitize, short_hash, FilenameRegistry};
pub use sink::{failures_csv, OutputSink, CHILDREN_SUFFIX, FAILURES_FILE, PAGE_SUFFIX};
pub use stats::{print_summary, CrawlReport, CrawlStatistics, RunCounters};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
