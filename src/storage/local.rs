//! Local filesystem sink.
//!
//! Keeps every recorded listing in a single JSON document. Writes go to a
//! temporary file which is then renamed over the original, so a failed
//! write never leaves a truncated document behind.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::ListingRecord;
use crate::storage::{ListingsFile, Sink};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalSink {
    path: PathBuf,
}

impl LocalSink {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a sink for `file_name` inside the storage directory.
    pub fn in_dir(root_dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self::new(root_dir.as_ref().join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all recorded listings. A missing file means nothing is recorded.
    pub async fn load(&self) -> Result<Vec<ListingRecord>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let file: ListingsFile = serde_json::from_slice(&bytes)?;
                Ok(file.records)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No listings file at {}", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl Sink for LocalSink {
    async fn existing_keys(&self) -> Result<HashSet<String>> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .map(|record| record.url)
            .collect())
    }

    async fn append_records(&self, records: &[ListingRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut all = self.load().await?;
        let start_row = all.len() + 1;
        all.extend_from_slice(records);

        let bytes = serde_json::to_vec_pretty(&ListingsFile::new(all))?;
        self.write_bytes(&bytes).await?;

        log::info!(
            "Appended {} listings to {} starting at row {}",
            records.len(),
            self.path.display(),
            start_row
        );
        Ok(())
    }
}
