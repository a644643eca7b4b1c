// src/pipeline/crawl.rs

//! Listing crawling pipeline.

use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, RunSummary, SearchQuery};
use crate::pipeline::{DedupMerger, Paginator};
use crate::services::Fetcher;
use crate::storage::Sink;

/// Run the listing crawler.
///
/// Traverses the result pages, merges the kept listings against the keys
/// already in `sink` and appends the new ones. Nothing is written to the
/// sink unless traversal and merge both complete.
pub async fn run_crawler(
    config: &Config,
    query: &SearchQuery,
    fetcher: Arc<dyn Fetcher>,
    sink: &dyn Sink,
) -> Result<RunSummary> {
    let start_time = Utc::now();
    log::info!("Crawling listings for {query}");

    let store = Paginator::new(config, fetcher)?.run(query).await?;

    let existing = sink.existing_keys().await?;
    let new_records = DedupMerger::new().merge(&store, &existing);

    if new_records.is_empty() {
        log::info!("No new listings found to add");
    } else {
        log::info!(
            "{} new listings ({} already recorded)",
            new_records.len(),
            store.len() - new_records.len()
        );
        sink.append_records(&new_records).await?;
    }

    let summary = RunSummary {
        start_time,
        end_time: Utc::now(),
        processed: store.processed(),
        kept: store.len(),
        failures: store.failures(),
        added: new_records.len(),
    };

    log::info!(
        "Crawl finished in {}s: {} processed, {} kept, {} added",
        summary.elapsed_secs(),
        summary.processed,
        summary.kept,
        summary.added
    );

    Ok(summary)
}
