//! Crawl state tracking module
//!
//! This module manages the shared, mutable state of a crawl run:
//! - Fetch outcomes produced by workers
//! - The failure collector appended to by every component
//! - The seen-sets enforcing the URL uniqueness policy

mod failure;
mod page_state;
mod seen;

pub use failure::{FailureCollector, FailureKind, FailureRecord, UNKNOWN_URL};
pub use page_state::{FetchStatus, PageOutcome};
pub use seen::SeenSet;
