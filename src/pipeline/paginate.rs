// src/pipeline/paginate.rs

//! Sequential traversal of search-result pages.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Config, SearchQuery};
use crate::pipeline::{AggregationStore, PageProcessor};
use crate::services::{DetailProcessor, Fetcher, ResultFilter, SkillExtractor};

/// Fetches result pages `1..=traversal_depth` in order and aggregates
/// the listings that pass filtering.
pub struct Paginator {
    fetcher: Arc<dyn Fetcher>,
    extractor: SkillExtractor,
    base_url: String,
    max_concurrent: usize,
    max_failures: usize,
    stop_at_last_document: bool,
}

impl Paginator {
    pub fn new(config: &Config, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        Ok(Self {
            fetcher,
            extractor: SkillExtractor::new(&config.extraction)?,
            base_url: config.crawler.base_url.clone(),
            max_concurrent: config.crawler.max_concurrent,
            max_failures: config.crawler.max_detail_failures,
            stop_at_last_document: config.crawler.stop_at_last_document,
        })
    }

    /// Traverse the configured number of pages.
    ///
    /// Each page's listings are fully processed before the next page is
    /// requested. Any error aborts the traversal.
    pub async fn run(&self, query: &SearchQuery) -> Result<AggregationStore> {
        let filter = ResultFilter::new(&query.content_filters)?;
        let detail = DetailProcessor::new(Arc::clone(&self.fetcher), filter, self.extractor.clone());
        let pages = PageProcessor::new(detail, self.max_concurrent, self.max_failures);

        let mut store = AggregationStore::new();

        for page in 1..=query.traversal_depth {
            log::info!("Fetching result page {page}/{}", query.traversal_depth);

            let response = self
                .fetcher
                .fetch(&self.base_url, &query.page_params(page))
                .await
                .inspect_err(|e| log::error!("Result page {page} failed for {query}: {e}"))?;

            let report = pages.process(page, query, &response, &mut store).await?;
            log::info!(
                "Page {page}: kept {} of {} listings ({} total)",
                report.kept,
                report.listings,
                store.len()
            );

            if self.stop_at_last_document && report.is_last() {
                log::info!("Last document reached on page {page}, stopping early");
                break;
            }
        }

        Ok(store)
    }
}
