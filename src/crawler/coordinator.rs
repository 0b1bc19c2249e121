//! Crawler coordinator - run-level orchestration
//!
//! This module wires one crawl run together:
//! - Preparing the run's output directory
//! - Building the fetch client and the output sink
//! - Driving the depth scheduler
//! - Writing the failures file and assembling the final report
//! - Translating Ctrl+C into the shared shutdown signal

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::scheduler::Scheduler;
use crate::crawler::shutdown::ShutdownSignal;
use crate::output::{CrawlReport, OutputSink};
use crate::state::FailureCollector;
use crate::Result;
use std::sync::Arc;

/// Main crawler coordinator structure
pub struct Coordinator<F = HttpFetcher> {
    config: Arc<CrawlConfig>,
    fetcher: Arc<F>,
    shutdown: ShutdownSignal,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The (already validated) run configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlerError)` - The HTTP client could not be built
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.fetch_timeout)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: Fetch> Coordinator<F> {
    /// Creates a coordinator around any [`Fetch`] implementation
    pub fn with_fetcher(config: CrawlConfig, fetcher: F) -> Self {
        Self {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
            shutdown: ShutdownSignal::new(),
        }
    }

    /// Handle for requesting a graceful stop of this run
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Runs the crawl to completion (or until shutdown) and reports on it
    ///
    /// Only run-level problems are returned as errors. Everything that goes
    /// wrong with an individual URL ends up in the report's failure count
    /// and in the failures file.
    pub async fn run(self) -> Result<CrawlReport> {
        let run_dir = self.config.run_dir();
        tokio::fs::create_dir_all(&run_dir).await?;

        tracing::info!("Starting crawl from {}", self.config.start_url);
        tracing::info!(
            "Max depth: {}, max URLs per page: {}, cross-level uniqueness: {}, workers: {}",
            self.config.max_depth,
            self.config.max_urls_per_page,
            self.config.cross_level_uniqueness,
            self.config.workers
        );
        tracing::info!("Writing output to {}", run_dir.display());

        let failures = Arc::new(FailureCollector::new());
        let sink = Arc::new(OutputSink::new(run_dir.clone(), Arc::clone(&failures)));

        let scheduler = Scheduler::new(
            Arc::clone(&self.config),
            Arc::clone(&self.fetcher),
            Arc::clone(&sink),
            Arc::clone(&failures),
            self.shutdown.clone(),
        );
        let stats = scheduler.run().await;

        if !failures.is_empty() {
            tracing::warn!("{} failure records collected", failures.len());
        }
        let records = failures.drain();
        let failures_file = match sink.flush_failures(&records).await {
            Ok(path) => path,
            Err(e) => {
                tracing::error!("Failed to write failures file: {}", e);
                None
            }
        };

        let interrupted = self.shutdown.is_raised();
        if interrupted {
            tracing::warn!("Crawl was interrupted; output is partial");
        }

        Ok(CrawlReport {
            run_dir,
            stats,
            failure_count: records.len(),
            failures_file,
            interrupted,
        })
    }
}

/// Runs a complete crawl over HTTP, stopping gracefully on Ctrl+C
///
/// This is the main entry point used by the binary.
///
/// # Example
///
/// ```no_run
/// use depth_crawler::config::CrawlConfig;
/// use depth_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CrawlConfig::new("https://example.com/", 5, 2, true, "2025-01-01_00-00-00");
/// let report = run_crawl(config).await?;
/// println!("{} pages fetched", report.stats.ok);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: CrawlConfig) -> Result<CrawlReport> {
    let coordinator = Coordinator::new(config)?;
    let shutdown = coordinator.shutdown_signal();

    let listener = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, shutting down gracefully...");
            shutdown.raise();
        }
    });

    let report = coordinator.run().await;
    listener.abort();
    report
}
