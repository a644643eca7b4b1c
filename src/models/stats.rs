//! Run statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a completed crawl run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Listings processed across all pages
    pub processed: usize,
    /// Listings that passed filtering
    pub kept: usize,
    /// Detail fetches dropped after transport failures
    pub failures: usize,
    /// Records that were new to the sink and got appended
    pub added: usize,
}

impl RunSummary {
    pub fn elapsed_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}
