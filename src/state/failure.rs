//! Failure records and the run-wide failure collector
//!
//! Any worker may append; only run finalization drains.

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Placeholder URL for failures that cannot be attributed to a page
pub const UNKNOWN_URL: &str = "<unknown>";

/// Kind of a recorded failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Transport deadline exceeded
    Timeout,
    /// Any other fetch or transport error
    Failed,
    /// Writing a page or children file failed
    SaveFailed,
    /// A fetch task died unexpectedly
    Crashed,
    /// A fetch could not be scheduled, typically during shutdown
    Rejected,
}

impl FailureKind {
    /// String written to the `type` column of the failures file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "TIMEOUT",
            Self::Failed => "FAILED",
            Self::SaveFailed => "SAVE_FAILED",
            Self::Crashed => "CRASHED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the failures file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub depth: u32,
    pub url: String,
    pub kind: FailureKind,
    pub message: String,
}

impl FailureRecord {
    pub fn new(
        depth: u32,
        url: impl Into<String>,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            depth,
            url: url.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Append-only, thread-safe collection of failure records
#[derive(Debug, Default)]
pub struct FailureCollector {
    records: Mutex<Vec<FailureRecord>>,
}

impl FailureCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record
    pub fn add(&self, record: FailureRecord) {
        tracing::debug!(
            "{} at depth {}: {} ({})",
            record.kind,
            record.depth,
            record.url,
            record.message
        );
        self.lock().push(record);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Takes every record, leaving the collector empty
    pub fn drain(&self) -> Vec<FailureRecord> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<FailureRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
