//! URL seen-sets enforcing the crawl's uniqueness policy
//!
//! Every membership check is a single insert-if-absent under one lock, so
//! two workers can never both believe they were first to claim a URL.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

/// Deduplication state for one crawl run
#[derive(Debug)]
pub enum SeenSet {
    /// One set shared by every depth: a URL is accepted at most once per run
    Global(Mutex<HashSet<String>>),

    /// One set per target depth: a URL is accepted at most once per depth
    PerDepth(Mutex<HashMap<u32, HashSet<String>>>),
}

impl SeenSet {
    /// Creates the seen-set matching the cross-level-uniqueness flag
    pub fn new(cross_level_uniqueness: bool) -> Self {
        if cross_level_uniqueness {
            Self::Global(Mutex::new(HashSet::new()))
        } else {
            Self::PerDepth(Mutex::new(HashMap::new()))
        }
    }

    /// Marks the start URL as seen so it is never re-accepted as a child
    ///
    /// Only meaningful in global mode; per-depth sets start empty.
    pub fn seed_root(&self, url: &str) {
        if let Self::Global(set) = self {
            set.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(url.to_string());
        }
    }

    /// Claims `url` for `depth`; returns false if it was already claimed
    pub fn claim(&self, depth: u32, url: &str) -> bool {
        match self {
            Self::Global(set) => set
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(url.to_string()),
            Self::PerDepth(sets) => sets
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(depth)
                .or_default()
                .insert(url.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_global_rejects_across_depths() {
        let seen = SeenSet::new(true);
        assert!(seen.claim(1, "https://x.test/a"));
        assert!(!seen.claim(1, "https://x.test/a"));
        assert!(!seen.claim(2, "https://x.test/a"));
        assert!(!seen.claim(5, "https://x.test/a"));
    }

    #[test]
    fn test_per_depth_allows_other_depths() {
        let seen = SeenSet::new(false);
        assert!(seen.claim(1, "https://x.test/a"));
        assert!(!seen.claim(1, "https://x.test/a"));
        assert!(seen.claim(2, "https://x.test/a"));
        assert!(seen.claim(3, "https://x.test/a"));
    }

    #[test]
    fn test_seed_root_global_only() {
        let global = SeenSet::new(true);
        global.seed_root("https://x.test/");
        assert!(!global.claim(1, "https://x.test/"));

        let per_depth = SeenSet::new(false);
        per_depth.seed_root("https://x.test/");
        assert!(per_depth.claim(1, "https://x.test/"));
    }

    #[test]
    fn test_concurrent_claims_have_one_winner() {
        let seen = Arc::new(SeenSet::new(true));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let seen = Arc::clone(&seen);
                std::thread::spawn(move || seen.claim(1, "https://x.test/contested"))
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
