use std::path::PathBuf;
use std::time::Duration;

/// Per-request deadline covering connect and read
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// How long in-flight fetches may keep running after an interrupt
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Lower bound on the size of the fetch worker pool
pub const MIN_WORKERS: usize = 4;

/// Directory under which every run gets its own subdirectory
pub const DEFAULT_OUTPUT_ROOT: &str = "output";

/// Returns `max(MIN_WORKERS, available hardware parallelism)`
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(MIN_WORKERS)
}

/// Immutable settings for a single crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// URL the crawl starts from (depth 0)
    pub start_url: String,

    /// Maximum number of children accepted from any one page
    pub max_urls_per_page: usize,

    /// Deepest level fetched; depth 0 is the start URL only
    pub max_depth: u32,

    /// When true a URL is fetched at most once across all depths
    pub cross_level_uniqueness: bool,

    /// Identifier of this run, used only to namespace the output tree
    pub run_id: String,

    /// Directory holding the per-run output directories
    pub output_root: PathBuf,

    /// Per-request timeout handed to the HTTP client
    pub fetch_timeout: Duration,

    /// Grace period for in-flight fetches after an interrupt
    pub shutdown_grace: Duration,

    /// Number of fetches allowed to run at once
    pub workers: usize,
}

impl CrawlConfig {
    /// Creates a configuration with default tuning values
    pub fn new(
        start_url: impl Into<String>,
        max_urls_per_page: usize,
        max_depth: u32,
        cross_level_uniqueness: bool,
        run_id: impl Into<String>,
    ) -> Self {
        Self {
            start_url: start_url.into(),
            max_urls_per_page,
            max_depth,
            cross_level_uniqueness,
            run_id: run_id.into(),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            workers: default_workers(),
        }
    }

    /// Directory this run writes into: `<output_root>/<run_id>`
    pub fn run_dir(&self) -> PathBuf {
        self.output_root.join(&self.run_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::new("https://example.com/", 3, 1, false, "run");
        assert_eq!(config.fetch_timeout, Duration::from_secs(15));
        assert_eq!(config.shutdown_grace, Duration::from_secs(10));
        assert!(config.workers >= MIN_WORKERS);
        assert_eq!(config.output_root, PathBuf::from("output"));
    }

    #[test]
    fn test_run_dir() {
        let config = CrawlConfig {
            output_root: PathBuf::from("/tmp/crawls"),
            ..CrawlConfig::new("https://example.com/", 3, 1, false, "2025-12-25_15-30-12")
        };
        assert_eq!(
            config.run_dir(),
            PathBuf::from("/tmp/crawls/2025-12-25_15-30-12")
        );
    }
}
