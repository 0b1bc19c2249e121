//! File-system output sink
//!
//! Layout of one run:
//!
//! ```text
//! <run_dir>/
//!   failures.csv
//!   0/
//!     <stem>.html
//!     <stem>.children.txt
//!   1/
//!     ...
//! ```

use crate::output::naming::FilenameRegistry;
use crate::output::OutputError;
use crate::state::{FailureCollector, FailureKind, FailureRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the run-scoped failures file
pub const FAILURES_FILE: &str = "failures.csv";

/// Suffix of saved page files
pub const PAGE_SUFFIX: &str = ".html";

/// Suffix of children-list files
pub const CHILDREN_SUFFIX: &str = ".children.txt";

const FAILURES_HEADER: &str = "depth,url,type,message";

/// Writes pages, children lists and the failures file for one run
///
/// Write failures for pages and children lists are recorded as
/// `SAVE_FAILED` and never propagated.
#[derive(Debug)]
pub struct OutputSink {
    run_dir: PathBuf,
    names: FilenameRegistry,
    failures: Arc<FailureCollector>,
}

impl OutputSink {
    pub fn new(run_dir: impl Into<PathBuf>, failures: Arc<FailureCollector>) -> Self {
        Self {
            run_dir: run_dir.into(),
            names: FilenameRegistry::new(),
            failures,
        }
    }

    /// Directory holding everything saved at `depth`
    pub fn depth_dir(&self, depth: u32) -> PathBuf {
        self.run_dir.join(depth.to_string())
    }

    /// Path of the page file for `url` at `depth`
    pub fn page_path(&self, depth: u32, url: &str) -> PathBuf {
        let stem = self.names.reserve(depth, url);
        self.depth_dir(depth).join(format!("{}{}", stem, PAGE_SUFFIX))
    }

    /// Path of the children file for `url` at `depth`; same stem as the page
    pub fn children_path(&self, depth: u32, url: &str) -> PathBuf {
        let stem = self.names.reserve(depth, url);
        self.depth_dir(depth).join(format!("{}{}", stem, CHILDREN_SUFFIX))
    }

    /// Saves a page body, overwriting an earlier save of the same URL at
    /// the same depth
    ///
    /// Returns the written path, or `None` if the write failed.
    pub async fn save_page(&self, depth: u32, url: &str, content: &str) -> Option<PathBuf> {
        let path = self.page_path(depth, url);
        self.write_recorded(depth, url, path, content).await
    }

    /// Saves the selected children of a page, one URL per line
    pub async fn save_children(
        &self,
        depth: u32,
        parent_url: &str,
        children: &[String],
    ) -> Option<PathBuf> {
        let path = self.children_path(depth, parent_url);
        let mut content = children.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        self.write_recorded(depth, parent_url, path, &content).await
    }

    /// Writes the failures file if there is anything to report
    ///
    /// Returns the file's path, or `None` when `records` is empty.
    pub async fn flush_failures(
        &self,
        records: &[FailureRecord],
    ) -> Result<Option<PathBuf>, OutputError> {
        if records.is_empty() {
            return Ok(None);
        }

        tokio::fs::create_dir_all(&self.run_dir).await?;

        let content = failures_csv(records)?;
        let path = self.run_dir.join(FAILURES_FILE);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| OutputError::Write(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Wrote failures file: {}", path.display());
        Ok(Some(path))
    }

    async fn write_recorded(
        &self,
        depth: u32,
        url: &str,
        path: PathBuf,
        content: &str,
    ) -> Option<PathBuf> {
        match write_file(&path, content).await {
            Ok(()) => Some(path),
            Err(e) => {
                self.failures.add(FailureRecord::new(
                    depth,
                    url,
                    FailureKind::SaveFailed,
                    e.to_string(),
                ));
                None
            }
        }
    }
}

async fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await
}

/// Renders the failures file: an unquoted header, then one fully quoted
/// `depth,url,type,message` row per record with embedded quotes doubled
pub fn failures_csv(records: &[FailureRecord]) -> Result<Vec<u8>, OutputError> {
    let mut out = Vec::new();
    out.extend_from_slice(FAILURES_HEADER.as_bytes());
    out.push(b'\n');

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    for record in records {
        writer.write_record([
            record.depth.to_string().as_str(),
            record.url.as_str(),
            record.kind.as_str(),
            record.message.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| OutputError::Write(e.to_string()))
}
