//! Depth-synchronous crawl scheduler
//!
//! This module handles:
//! - Dispatching one fetch task per frontier URL onto a bounded worker pool
//! - Draining every task of a depth before the next depth starts
//! - Counting outcomes and recording crashed or rejected tasks
//! - Selecting each page's children and building the next frontier
//! - Stopping admission and bounding the drain once shutdown is raised

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{Fetch, FetchResult};
use crate::crawler::selection::ChildSelector;
use crate::crawler::shutdown::ShutdownSignal;
use crate::output::{CrawlStatistics, OutputSink, RunCounters};
use crate::state::{
    FailureCollector, FailureKind, FailureRecord, FetchStatus, PageOutcome, UNKNOWN_URL,
};
use crate::url::normalize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;

/// Placeholder body saved for a page whose fetch timed out
pub const TIMEOUT_PLACEHOLDER: &str = "<!-- timeout -->";

/// Scheduler drives the fetch → select → enqueue loop for one run
///
/// The scheduler coordinates:
/// - The worker pool (a semaphore sized by `workers`)
/// - The uniqueness policy and fan-out cap (via [`ChildSelector`])
/// - Outcome counters and failure records
/// - Cooperative shutdown
pub struct Scheduler<F> {
    config: Arc<CrawlConfig>,
    fetcher: Arc<F>,
    sink: Arc<OutputSink>,
    failures: Arc<FailureCollector>,
    counters: RunCounters,
    selector: ChildSelector,
    workers: Arc<Semaphore>,
    shutdown: ShutdownSignal,
}

impl<F: Fetch> Scheduler<F> {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration
    /// * `fetcher` - Fetch client shared by all worker tasks
    /// * `sink` - Output sink for pages and children lists
    /// * `failures` - Collector shared with the sink
    /// * `shutdown` - Signal that stops admission of new work
    pub fn new(
        config: Arc<CrawlConfig>,
        fetcher: Arc<F>,
        sink: Arc<OutputSink>,
        failures: Arc<FailureCollector>,
        shutdown: ShutdownSignal,
    ) -> Self {
        let selector = ChildSelector::new(config.max_urls_per_page, config.cross_level_uniqueness);
        let workers = Arc::new(Semaphore::new(config.workers.max(1)));

        Self {
            config,
            fetcher,
            sink,
            failures,
            counters: RunCounters::new(),
            selector,
            workers,
            shutdown,
        }
    }

    /// Runs the crawl until the frontier empties, the depth limit is
    /// passed, or shutdown is raised
    ///
    /// Per-URL failures are recorded, never returned.
    pub async fn run(&self) -> CrawlStatistics {
        let root = normalize(&self.config.start_url);
        self.selector.seed_root(&root);

        let mut frontier = vec![root];
        let mut depth = 0u32;

        while !frontier.is_empty() && depth <= self.config.max_depth {
            if self.shutdown.is_raised() {
                tracing::info!(
                    "Shutdown raised, not starting depth {} ({} URLs pending)",
                    depth,
                    frontier.len()
                );
                for url in frontier {
                    self.reject(depth, url);
                }
                break;
            }

            tracing::info!("Crawling depth {} ({} URLs)", depth, frontier.len());
            frontier = self.crawl_level(depth, frontier).await;
            depth += 1;
        }

        let stats = self.counters.snapshot();
        tracing::info!(
            "Crawl finished: {} fetches ({} ok, {} timeouts, {} failed)",
            stats.total(),
            stats.ok,
            stats.timeouts,
            stats.failed
        );
        stats
    }

    /// Fetches every URL of one depth and returns the next depth's frontier
    async fn crawl_level(&self, depth: u32, frontier: Vec<String>) -> Vec<String> {
        let mut tasks = JoinSet::new();

        for url in frontier {
            if self.shutdown.is_raised() {
                self.reject(depth, url);
                continue;
            }

            let permit = tokio::select! {
                permit = Arc::clone(&self.workers).acquire_owned() => permit,
                _ = self.shutdown.raised() => {
                    self.reject(depth, url);
                    continue;
                }
            };
            let Ok(permit) = permit else {
                self.reject(depth, url);
                continue;
            };

            let fetcher = Arc::clone(&self.fetcher);
            let sink = Arc::clone(&self.sink);
            let failures = Arc::clone(&self.failures);
            tasks.spawn(async move {
                let _permit = permit;
                fetch_and_save(&*fetcher, &sink, &failures, depth, url).await
            });
        }

        let mut next = Vec::new();
        let mut deadline: Option<Instant> = None;

        loop {
            let joined = match deadline {
                None => tokio::select! {
                    joined = tasks.join_next() => joined,
                    _ = self.shutdown.raised() => {
                        tracing::warn!(
                            "Shutdown raised, giving {} in-flight fetches {:?} to finish",
                            tasks.len(),
                            self.config.shutdown_grace
                        );
                        deadline = Some(Instant::now() + self.config.shutdown_grace);
                        continue;
                    }
                },
                Some(at) => match tokio::time::timeout_at(at, tasks.join_next()).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        tracing::warn!(
                            "Grace period expired, cancelling {} fetches",
                            tasks.len()
                        );
                        tasks.abort_all();
                        while let Some(joined) = tasks.join_next().await {
                            self.handle_joined(depth, joined, &mut next).await;
                        }
                        break;
                    }
                },
            };

            let Some(joined) = joined else {
                break;
            };
            self.handle_joined(depth, joined, &mut next).await;
        }

        next
    }

    /// Consumes one finished task
    async fn handle_joined(
        &self,
        depth: u32,
        joined: Result<PageOutcome, JoinError>,
        next: &mut Vec<String>,
    ) {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                let message = if e.is_cancelled() {
                    "fetch cancelled after shutdown grace period".to_string()
                } else {
                    e.to_string()
                };
                self.failures.add(FailureRecord::new(
                    depth,
                    UNKNOWN_URL,
                    FailureKind::Crashed,
                    message,
                ));
                return;
            }
        };

        self.counters.record(outcome.status);

        if outcome.depth >= self.config.max_depth {
            return;
        }

        let child_depth = outcome.depth + 1;
        let children = self
            .selector
            .select(&outcome.url, &outcome.links, child_depth);
        self.sink
            .save_children(outcome.depth, &outcome.url, &children)
            .await;

        if !self.shutdown.is_raised() {
            next.extend(children);
        }
    }

    fn reject(&self, depth: u32, url: String) {
        self.failures.add(FailureRecord::new(
            depth,
            url,
            FailureKind::Rejected,
            "fetch not scheduled: crawl is shutting down",
        ));
    }
}

/// Body of one worker task: fetch, persist, report
async fn fetch_and_save<F: Fetch>(
    fetcher: &F,
    sink: &OutputSink,
    failures: &FailureCollector,
    depth: u32,
    url: String,
) -> PageOutcome {
    tracing::debug!("Fetching [depth {}]: {}", depth, url);

    match fetcher.fetch(&url).await {
        FetchResult::Success { body, links } => {
            sink.save_page(depth, &url, &body).await;
            PageOutcome::ok(url, depth, links)
        }
        FetchResult::Timeout { error } => {
            failures.add(FailureRecord::new(depth, &url, FailureKind::Timeout, error));
            sink.save_page(depth, &url, TIMEOUT_PLACEHOLDER).await;
            PageOutcome::unsuccessful(url, depth, FetchStatus::Timeout)
        }
        FetchResult::Failed { error } => {
            let placeholder = failure_placeholder(&error);
            failures.add(FailureRecord::new(depth, &url, FailureKind::Failed, error));
            sink.save_page(depth, &url, &placeholder).await;
            PageOutcome::unsuccessful(url, depth, FetchStatus::Failed)
        }
    }
}

/// Placeholder body for a failed fetch, safe to embed in an HTML comment
pub fn failure_placeholder(message: &str) -> String {
    format!("<!-- failed: {} -->", escape_for_html_comment(message))
}

/// Replaces `--` so the text cannot terminate an HTML comment early
pub fn escape_for_html_comment(s: &str) -> String {
    s.replace("--", "__")
}
