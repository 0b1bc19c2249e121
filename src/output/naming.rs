//! Collision-free output filenames
//!
//! Many distinct URLs sanitize to the same readable name, so names are
//! reserved per depth: the same URL always maps to the same stem at a given
//! depth, and two different URLs never share one.

use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

/// Longest readable base name used on its own
pub const MAX_BASE_LEN: usize = 150;

/// Length of the readable prefix kept in hashed names
pub const HASHED_PREFIX_LEN: usize = 80;

/// Number of digest bytes in the short hash (12 hex characters)
const SHORT_HASH_BYTES: usize = 6;

/// Stem used when a URL has no alphanumeric characters at all
const EMPTY_STEM: &str = "page";

/// Replaces every run of non-alphanumeric characters with a single `_`
///
/// The result is lossy and capped at [`MAX_BASE_LEN`] characters.
///
/// ```
/// use depth_crawler::output::sanitize;
///
/// assert_eq!(sanitize("https://example.com/a-b"), "https_example_com_a_b");
/// ```
pub fn sanitize(url: &str) -> String {
    let mut out = String::with_capacity(url.len().min(MAX_BASE_LEN));
    let mut in_filler = false;

    for c in url.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            in_filler = false;
        } else if !in_filler {
            out.push('_');
            in_filler = true;
        }
        if out.len() >= MAX_BASE_LEN {
            break;
        }
    }

    if out.chars().all(|c| c == '_') {
        return EMPTY_STEM.to_string();
    }
    out
}

/// Hex-encoded prefix of the SHA-256 digest of the full URL
pub fn short_hash(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    hex::encode(&digest[..SHORT_HASH_BYTES])
}

/// Readable prefix plus short hash, e.g. `https_example_com_a__1f2e3d4c5b6a`
pub fn hashed_stem(url: &str) -> String {
    let base = sanitize(url);
    let prefix = &base[..base.len().min(HASHED_PREFIX_LEN)];
    format!("{}__{}", prefix, short_hash(url))
}

/// Names already handed out at one depth
#[derive(Debug, Default)]
struct DepthNames {
    by_url: HashMap<String, String>,
    used: HashSet<String>,
}

impl DepthNames {
    fn reserve(&mut self, url: &str) -> String {
        if let Some(stem) = self.by_url.get(url) {
            return stem.clone();
        }

        let base = sanitize(url);
        let stem = if !self.used.contains(&base) {
            base
        } else {
            let hashed = hashed_stem(url);
            if !self.used.contains(&hashed) {
                hashed
            } else {
                let mut n = 2u64;
                loop {
                    let candidate = format!("{}_{}", hashed, n);
                    if !self.used.contains(&candidate) {
                        break candidate;
                    }
                    n += 1;
                }
            }
        };

        self.used.insert(stem.clone());
        self.by_url.insert(url.to_string(), stem.clone());
        stem
    }
}

/// Thread-safe registry of reserved filename stems, partitioned by depth
#[derive(Debug, Default)]
pub struct FilenameRegistry {
    depths: Mutex<HashMap<u32, DepthNames>>,
}

impl FilenameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stem reserved for `url` at `depth`, reserving one if needed
    ///
    /// Lookup and reservation happen under a single lock.
    pub fn reserve(&self, depth: u32, url: &str) -> String {
        self.depths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(depth)
            .or_default()
            .reserve(url)
    }
}
