//! URL handling module for Depth-Crawler
//!
//! This module canonicalizes URLs for deduplication, resolves hrefs found in
//! pages against the page they came from, and decides which links are worth
//! fetching at all.

mod normalize;

// Re-export main functions
pub use normalize::{clean_raw_href, is_fetchable, normalize, resolve};
