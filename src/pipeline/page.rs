// src/pipeline/page.rs

//! Search-result page processing.

use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{SearchPage, SearchQuery};
use crate::pipeline::AggregationStore;
use crate::services::{DetailOutcome, DetailProcessor, FetchedPage};

/// Counts reported by the search API for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageReport {
    pub page: u32,
    pub count: u64,
    pub last_document: u64,
    pub listings: usize,
    pub kept: usize,
}

impl PageReport {
    /// Whether the API reports no postings beyond this page.
    pub fn is_last(&self) -> bool {
        self.last_document >= self.count
    }
}

/// Parses a search-result page and processes its listings concurrently.
pub struct PageProcessor {
    detail: DetailProcessor,
    max_concurrent: usize,
    max_failures: usize,
}

impl PageProcessor {
    pub fn new(detail: DetailProcessor, max_concurrent: usize, max_failures: usize) -> Self {
        Self {
            detail,
            max_concurrent: max_concurrent.max(1),
            max_failures,
        }
    }

    /// Decode a search-result body.
    pub fn parse(page: u32, query: &SearchQuery, response: &FetchedPage) -> Result<SearchPage> {
        serde_json::from_str(&response.body).map_err(|e| AppError::Schema {
            page,
            url: response.url.clone(),
            query: query.to_string(),
            message: e.to_string(),
        })
    }

    /// Process every listing on the page, at most `max_concurrent` at a time.
    ///
    /// Returns once all listings on the page are done. The store is only
    /// written from this loop.
    pub async fn process(
        &self,
        page: u32,
        query: &SearchQuery,
        response: &FetchedPage,
        store: &mut AggregationStore,
    ) -> Result<PageReport> {
        let results = Self::parse(page, query, response)?;

        log::info!(
            "Processing postings: {} | Total postings: {} | Total processed: {}",
            results.last_document,
            results.count,
            store.processed()
        );

        let mut kept = 0;
        let mut outcomes = stream::iter(&results.result_item_list)
            .map(|listing| self.detail.process(listing))
            .buffer_unordered(self.max_concurrent);

        while let Some(outcome) = outcomes.next().await {
            store.record_processed();

            match outcome? {
                DetailOutcome::Kept(record) => {
                    if store.insert(record) {
                        kept += 1;
                    }
                }
                DetailOutcome::Filtered | DetailOutcome::Skipped => {}
                DetailOutcome::Failed(error) => {
                    let failures = store.record_failure();
                    log::warn!("Dropping listing after fetch failure: {error}");

                    if failures > self.max_failures {
                        log::error!("Too many failed detail fetches ({failures}), aborting");
                        return Err(AppError::TooManyFailures {
                            failures,
                            limit: self.max_failures,
                        });
                    }
                }
            }
        }

        Ok(PageReport {
            page,
            count: results.count,
            last_document: results.last_document,
            listings: results.result_item_list.len(),
            kept,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{ExtractionConfig, SearchConfig};
    use crate::services::{Fetcher, ResultFilter, SkillExtractor};

    /// Serves canned bodies and tracks peak concurrency.
    #[derive(Default)]
    struct CannedFetcher {
        bodies: HashMap<String, String>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl Fetcher for CannedFetcher {
        async fn fetch(&self, url: &str, _params: &[(&str, String)]) -> Result<FetchedPage> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let body = self
                .bodies
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::invalid_url(url, "no such listing"))?;
            Ok(FetchedPage {
                url: url.to_string(),
                status: 200,
                body,
            })
        }
    }

    fn query() -> SearchQuery {
        SearchQuery::new("java", &SearchConfig::default())
    }

    fn search_body(urls: &[&str]) -> FetchedPage {
        let items: Vec<_> = urls
            .iter()
            .map(|url| {
                serde_json::json!({
                    "detailUrl": url,
                    "jobTitle": "Engineer",
                    "company": "Acme",
                    "location": "NYC",
                    "date": "2014-01-01",
                })
            })
            .collect();
        let body = serde_json::json!({
            "count": urls.len(),
            "lastDocument": urls.len(),
            "resultItemList": items,
        });
        FetchedPage {
            url: "http://api/search".to_string(),
            status: 200,
            body: body.to_string(),
        }
    }

    fn processor(fetcher: Arc<CannedFetcher>, pool: usize) -> PageProcessor {
        let detail = DetailProcessor::new(
            fetcher,
            ResultFilter::default(),
            SkillExtractor::new(&ExtractionConfig::default()).unwrap(),
        );
        PageProcessor::new(detail, pool, 10)
    }

    #[tokio::test]
    async fn test_pool_is_bounded() {
        let urls: Vec<String> = (0..20).map(|i| format!("http://x/{i}")).collect();
        let fetcher = Arc::new(CannedFetcher {
            bodies: urls.iter().map(|u| (u.clone(), String::new())).collect(),
            ..CannedFetcher::default()
        });
        let url_refs: Vec<&str> = urls.iter().map(String::as_str).collect();

        let mut store = AggregationStore::new();
        let report = processor(Arc::clone(&fetcher), 4)
            .process(1, &query(), &search_body(&url_refs), &mut store)
            .await
            .unwrap();

        assert_eq!(report.listings, 20);
        assert_eq!(report.kept, 20);
        assert!(report.is_last());
        assert_eq!(store.len(), 20);
        assert_eq!(store.processed(), 20);
        assert!(fetcher.peak.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn test_duplicate_urls_on_page_kept_once() {
        let fetcher = Arc::new(CannedFetcher {
            bodies: HashMap::from([("http://x/1".to_string(), "Skills: Go".to_string())]),
            ..CannedFetcher::default()
        });

        let mut store = AggregationStore::new();
        let report = processor(fetcher, 50)
            .process(1, &query(), &search_body(&["http://x/1", "http://x/1"]), &mut store)
            .await
            .unwrap();

        assert_eq!(report.kept, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.processed(), 2);
    }

    #[tokio::test]
    async fn test_invalid_detail_url_does_not_affect_siblings() {
        let fetcher = Arc::new(CannedFetcher {
            bodies: HashMap::from([("http://x/1".to_string(), String::new())]),
            ..CannedFetcher::default()
        });

        let mut store = AggregationStore::new();
        processor(fetcher, 50)
            .process(1, &query(), &search_body(&["bad url", "http://x/1"]), &mut store)
            .await
            .unwrap();

        assert!(store.contains("http://x/1"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.failures(), 0);
    }

    #[tokio::test]
    async fn test_schema_violation_names_page() {
        let response = FetchedPage {
            url: "http://api/search?page=3".to_string(),
            status: 200,
            body: r#"{"count": 10}"#.to_string(),
        };

        let mut store = AggregationStore::new();
        let err = processor(Arc::new(CannedFetcher::default()), 50)
            .process(3, &query(), &response, &mut store)
            .await
            .unwrap_err();

        match err {
            AppError::Schema { page, url, query, .. } => {
                assert_eq!(page, 3);
                assert_eq!(url, "http://api/search?page=3");
                assert!(query.contains("java"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
