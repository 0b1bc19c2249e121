//! Per-page child selection
//!
//! Turns a page's raw hrefs into the ordered list of children that will be
//! crawled at the next depth.

use crate::state::SeenSet;
use crate::url::{clean_raw_href, is_fetchable, normalize, resolve};
use std::collections::HashSet;

/// Applies cleaning, resolution, the fan-out cap and the uniqueness policy
#[derive(Debug)]
pub struct ChildSelector {
    max_urls_per_page: usize,
    seen: SeenSet,
}

impl ChildSelector {
    pub fn new(max_urls_per_page: usize, cross_level_uniqueness: bool) -> Self {
        Self {
            max_urls_per_page,
            seen: SeenSet::new(cross_level_uniqueness),
        }
    }

    /// Registers the (normalized) start URL with the seen-set
    pub fn seed_root(&self, root: &str) {
        self.seen.seed_root(root);
    }

    /// Selects up to `max_urls_per_page` children of one page
    ///
    /// Links are visited in their original order. A link is dropped if it
    /// fails cleaning or resolution, is not http(s), already appeared on this
    /// page, or was already claimed under the uniqueness policy. Duplicates
    /// are removed before the cap is counted.
    pub fn select(&self, page_url: &str, raw_links: &[String], child_depth: u32) -> Vec<String> {
        let mut children = Vec::new();
        let mut on_page = HashSet::new();

        for raw in raw_links {
            if children.len() >= self.max_urls_per_page {
                break;
            }

            let Some(href) = clean_raw_href(raw) else {
                continue;
            };
            let Some(resolved) = resolve(page_url, &href) else {
                continue;
            };
            let candidate = normalize(&resolved);
            if !is_fetchable(&candidate) {
                continue;
            }
            if !on_page.insert(candidate.clone()) {
                continue;
            }
            if !self.seen.claim(child_depth, &candidate) {
                continue;
            }

            children.push(candidate);
        }

        children
    }
}
