//! Run counters and the end-of-run summary
//!
//! Counters are bumped exactly once per completed fetch and only read when
//! the summary is produced.

use crate::state::FetchStatus;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free per-outcome counters for one run
#[derive(Debug, Default)]
pub struct RunCounters {
    ok: AtomicU64,
    timeouts: AtomicU64,
    failed: AtomicU64,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one completed fetch
    pub fn record(&self, status: FetchStatus) {
        let counter = match status {
            FetchStatus::Ok => &self.ok,
            FetchStatus::Timeout => &self.timeouts,
            FetchStatus::Failed => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CrawlStatistics {
        CrawlStatistics {
            ok: self.ok.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Crawl statistics summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Pages fetched successfully
    pub ok: u64,

    /// Fetches that hit the transport deadline
    pub timeouts: u64,

    /// Fetches that failed for any other reason
    pub failed: u64,
}

impl CrawlStatistics {
    /// Total number of completed fetches
    pub fn total(&self) -> u64 {
        self.ok + self.timeouts + self.failed
    }
}

/// Final report of a crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Directory the run wrote into
    pub run_dir: PathBuf,

    /// Outcome counters
    pub stats: CrawlStatistics,

    /// Number of failure records collected
    pub failure_count: usize,

    /// Path of the failures file, if one was written
    pub failures_file: Option<PathBuf>,

    /// Whether the run was cut short by an interrupt
    pub interrupted: bool,
}

/// Prints the end-of-run summary to stdout
pub fn print_summary(report: &CrawlReport) {
    println!("==== Run summary ====");
    println!("Saved output under: {}", report.run_dir.display());
    println!("Fetched OK: {}", report.stats.ok);
    println!("Timeouts : {}", report.stats.timeouts);
    println!("Failed   : {}", report.stats.failed);
    println!("Total    : {}", report.stats.total());
    println!("Failure records: {}", report.failure_count);

    if report.interrupted {
        println!("Run was interrupted before the frontier was exhausted");
    }

    if let Some(path) = &report.failures_file {
        println!("Failures details: {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_record_each_status() {
        let counters = RunCounters::new();
        counters.record(FetchStatus::Ok);
        counters.record(FetchStatus::Ok);
        counters.record(FetchStatus::Timeout);
        counters.record(FetchStatus::Failed);

        let stats = counters.snapshot();
        assert_eq!(
            stats,
            CrawlStatistics {
                ok: 2,
                timeouts: 1,
                failed: 1
            }
        );
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let counters = Arc::new(RunCounters::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counters = Arc::clone(&counters);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        counters.record(FetchStatus::Ok);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counters.snapshot().ok, 8000);
    }
}
