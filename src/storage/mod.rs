//! Storage abstractions for listing persistence.
//!
//! A [`Sink`] is the system of record for listings collected by earlier
//! runs. The crawler only reads its keys and appends new records once a
//! run has completed.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml           # Crawler configuration
//! └── listings.json         # Recorded listings
//! ```

pub mod local;

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::ListingRecord;

// Re-export for convenience
pub use local::LocalSink;

/// Document stored by [`LocalSink`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsFile {
    /// ISO 8601 timestamp of last update
    pub updated_at: DateTime<Utc>,
    /// Total record count
    pub count: usize,
    /// Records in the order they were appended
    pub records: Vec<ListingRecord>,
}

impl ListingsFile {
    pub fn new(records: Vec<ListingRecord>) -> Self {
        Self {
            updated_at: Utc::now(),
            count: records.len(),
            records,
        }
    }
}

/// Trait for listing storage backends.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Detail URLs already recorded.
    async fn existing_keys(&self) -> Result<HashSet<String>>;

    /// Append records. Appending an empty slice does nothing.
    async fn append_records(&self, records: &[ListingRecord]) -> Result<()>;
}
