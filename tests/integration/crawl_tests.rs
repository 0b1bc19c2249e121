//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end into a temporary output directory.

use depth_crawler::config::CrawlConfig;
use depth_crawler::crawler::Coordinator;
use depth_crawler::output::{sanitize, CHILDREN_SUFFIX, FAILURES_FILE, PAGE_SUFFIX};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing under `dir`
fn create_test_config(
    dir: &TempDir,
    start_url: String,
    max_urls: usize,
    max_depth: u32,
    cross_level: bool,
) -> CrawlConfig {
    CrawlConfig {
        output_root: dir.path().to_path_buf(),
        fetch_timeout: Duration::from_secs(5),
        workers: 4,
        ..CrawlConfig::new(start_url, max_urls, max_depth, cross_level, "test-run")
    }
}

fn html_with_links(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!("<a href=\"{}\">link</a>\n", l))
        .collect();
    format!("<html><body>\n{}</body></html>", anchors)
}

async fn mount_page(server: &MockServer, at: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_with_links(links))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn page_file(run_dir: &Path, depth: u32, url: &str) -> PathBuf {
    run_dir
        .join(depth.to_string())
        .join(format!("{}{}", sanitize(url), PAGE_SUFFIX))
}

fn children_file(run_dir: &Path, depth: u32, url: &str) -> PathBuf {
    run_dir
        .join(depth.to_string())
        .join(format!("{}{}", sanitize(url), CHILDREN_SUFFIX))
}

#[tokio::test]
async fn test_full_crawl_writes_pages_and_children() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/root", &["/a", "/a", "/b", "/c"]).await;
    mount_page(&mock_server, "/a", &[]).await;
    mount_page(&mock_server, "/b", &[]).await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let root = format!("{}/root", base_url);
    let config = create_test_config(&dir, root.clone(), 2, 1, true);

    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.stats.ok, 3);
    assert_eq!(report.failure_count, 0);
    assert!(report.failures_file.is_none());

    let children = std::fs::read_to_string(children_file(&report.run_dir, 0, &root)).unwrap();
    assert_eq!(
        children,
        format!("{}/a\n{}/b\n", base_url, base_url),
        "duplicates are dropped before the cap is applied"
    );

    let body = std::fs::read_to_string(page_file(&report.run_dir, 0, &root)).unwrap();
    assert!(body.contains("href=\"/c\""));

    let a = format!("{}/a", base_url);
    assert!(page_file(&report.run_dir, 1, &a).exists());
    assert!(
        !children_file(&report.run_dir, 1, &a).exists(),
        "no children files at the deepest level"
    );
}

#[tokio::test]
async fn test_timeout_is_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let start = format!("{}/slow", base_url);
    let config = CrawlConfig {
        fetch_timeout: Duration::from_millis(250),
        ..create_test_config(&dir, start.clone(), 5, 0, true)
    };

    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.stats.timeouts, 1);
    assert_eq!(report.stats.ok, 0);
    assert_eq!(report.failure_count, 1);

    let placeholder = std::fs::read_to_string(page_file(&report.run_dir, 0, &start)).unwrap();
    assert_eq!(placeholder, "<!-- timeout -->");

    let csv = std::fs::read_to_string(report.run_dir.join(FAILURES_FILE)).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("depth,url,type,message"));
    let row = lines.next().unwrap();
    assert!(row.starts_with(&format!("\"0\",\"{}\",\"TIMEOUT\",", start)));
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn test_http_error_is_failed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/missing"]).await;

    let dir = TempDir::new().unwrap();
    let root = format!("{}/", base_url);
    let config = create_test_config(&dir, root, 5, 1, true);

    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.stats.ok, 1);
    assert_eq!(report.stats.failed, 1);

    let missing = format!("{}/missing", base_url);
    let placeholder = std::fs::read_to_string(page_file(&report.run_dir, 1, &missing)).unwrap();
    assert_eq!(placeholder, "<!-- failed: HTTP 404 Not Found -->");

    let csv = std::fs::read_to_string(report.failures_file.unwrap()).unwrap();
    assert!(csv.contains(&format!(
        "\"1\",\"{}\",\"FAILED\",\"HTTP 404 Not Found\"",
        missing
    )));
}

#[tokio::test]
async fn test_per_level_uniqueness_refetches_across_depths() {
    let mock_server = MockServer::start().await;

    // "/" links to "/a", "/a" links back to "/"
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_with_links(&["/a"])))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_with_links(&["/"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let root = format!("{}/", mock_server.uri());
    let config = create_test_config(&dir, root.clone(), 5, 2, false);

    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.stats.ok, 3);
    assert!(page_file(&report.run_dir, 0, &root).exists());
    assert!(page_file(&report.run_dir, 2, &root).exists());
}

#[tokio::test]
async fn test_cross_level_uniqueness_fetches_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_with_links(&["/a"])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_with_links(&["/", "/a"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let root = format!("{}/", mock_server.uri());
    let config = create_test_config(&dir, root.clone(), 5, 3, true);

    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.stats.ok, 2);
    let a_children = std::fs::read_to_string(children_file(
        &report.run_dir,
        1,
        &format!("{}/a", mock_server.uri()),
    ))
    .unwrap();
    assert!(a_children.is_empty());
}
