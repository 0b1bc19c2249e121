//! Depth-Crawler main entry point
//!
//! This is the command-line interface for the bounded depth-limited crawler.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use depth_crawler::config::{
    generate_run_id, parse_bool_flag, parse_non_negative, validate, CrawlConfig,
};
use depth_crawler::crawler::run_crawl;
use depth_crawler::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Depth-Crawler: a bounded, depth-limited web crawler
///
/// Starting from one URL, fetches pages level by level, follows at most
/// MAX_URLS children per page, and saves every page together with the list
/// of children chosen for it under output/<run-id>/.
#[derive(Parser, Debug)]
#[command(name = "depth-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A bounded, depth-limited web crawler", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// URL to start crawling from (depth 0)
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// Maximum number of children followed from each page
    #[arg(value_name = "MAX_URLS", value_parser = parse_non_negative::<usize>)]
    max_urls: usize,

    /// Deepest level to fetch (0 fetches only the start URL)
    #[arg(value_name = "MAX_DEPTH", value_parser = parse_non_negative::<u32>)]
    max_depth: u32,

    /// true: fetch each URL at most once per run; false: once per depth
    #[arg(value_name = "CROSS_LEVEL", value_parser = parse_bool_flag)]
    cross_level: bool,

    /// Directory under which the per-run output directory is created
    #[arg(long, value_name = "DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = CrawlConfig {
        output_root: cli.output_dir,
        ..CrawlConfig::new(
            cli.start_url,
            cli.max_urls,
            cli.max_depth,
            cli.cross_level,
            generate_run_id(),
        )
    };

    if let Err(e) = validate(&config) {
        Cli::command().error(ErrorKind::ValueValidation, e).exit();
    }

    let report = run_crawl(config)
        .await
        .context("Crawl could not be completed")?;

    print_summary(&report);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("depth_crawler=info,warn"),
            1 => EnvFilter::new("depth_crawler=debug,info"),
            2 => EnvFilter::new("depth_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
