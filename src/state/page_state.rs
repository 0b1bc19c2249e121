//! Page outcome definitions for tracking fetch results
//!
//! This module defines the result of a single fetch attempt as handed from a
//! worker back to the scheduler.

use std::fmt;

/// Status of one fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStatus {
    /// Page was fetched and its links extracted
    Ok,

    /// The transport deadline was exceeded
    Timeout,

    /// Any other transport or HTTP failure
    Failed,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ok => "ok",
            Self::Timeout => "timeout",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Result of one fetch attempt
///
/// Produced exactly once per dispatched fetch and consumed exactly once by
/// the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    /// The URL that was requested
    pub url: String,

    /// Depth the URL was fetched at
    pub depth: u32,

    /// How the fetch ended
    pub status: FetchStatus,

    /// Raw href values in document order; empty unless `status` is `Ok`
    pub links: Vec<String>,
}

impl PageOutcome {
    /// Creates a successful outcome carrying the page's raw links
    pub fn ok(url: String, depth: u32, links: Vec<String>) -> Self {
        Self {
            url,
            depth,
            status: FetchStatus::Ok,
            links,
        }
    }

    /// Creates an unsuccessful outcome; such pages never yield links
    pub fn unsuccessful(url: String, depth: u32, status: FetchStatus) -> Self {
        Self {
            url,
            depth,
            status,
            links: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsuccessful_has_no_links() {
        let outcome =
            PageOutcome::unsuccessful("https://x.test/".to_string(), 1, FetchStatus::Timeout);
        assert!(outcome.links.is_empty());
        assert_eq!(outcome.status, FetchStatus::Timeout);
    }

    #[test]
    fn test_display() {
        assert_eq!(FetchStatus::Ok.to_string(), "ok");
        assert_eq!(FetchStatus::Timeout.to_string(), "timeout");
        assert_eq!(FetchStatus::Failed.to_string(), "failed");
    }
}
