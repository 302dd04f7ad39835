//! Scheduled job bookkeeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use utoipa::ToSchema;

/// Public view of a scheduled job.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct JobInfo {
    pub name: String,
    /// Interval between runs, in milliseconds.
    pub interval_ms: u64,
    /// Number of completed runs.
    pub runs: u64,
}

pub(crate) struct JobEntry {
    pub name: String,
    pub every: Duration,
    pub runs: Arc<AtomicU64>,
}

impl JobEntry {
    pub fn info(&self) -> JobInfo {
        JobInfo {
            name: self.name.clone(),
            interval_ms: u64::try_from(self.every.as_millis()).unwrap_or(u64::MAX),
            runs: self.runs.load(Ordering::Relaxed),
        }
    }
}
