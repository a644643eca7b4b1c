//! In-memory aggregation of kept listings for one run.

use std::collections::HashMap;

use crate::models::ListingRecord;

/// Records collected during a run, keyed by detail URL.
///
/// Insertion is insert-or-noop: once a URL has a record it is never
/// replaced. Records are kept in discovery order.
#[derive(Debug, Clone, Default)]
pub struct AggregationStore {
    records: Vec<ListingRecord>,
    index: HashMap<String, usize>,
    processed: usize,
    failures: usize,
}

impl AggregationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record unless its key is already present.
    ///
    /// Returns `true` if the record was added.
    pub fn insert(&mut self, record: ListingRecord) -> bool {
        if self.index.contains_key(record.key()) {
            return false;
        }
        self.index.insert(record.key().to_string(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&ListingRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keys in discovery order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(ListingRecord::key)
    }

    /// Records in discovery order.
    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    /// Count one processed listing and return the running total.
    pub fn record_processed(&mut self) -> usize {
        self.processed += 1;
        self.processed
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Count one isolated detail failure and return the running total.
    pub fn record_failure(&mut self) -> usize {
        self.failures += 1;
        self.failures
    }

    pub fn failures(&self) -> usize {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, title: &str) -> ListingRecord {
        ListingRecord {
            date: "2014-01-01".to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "NYC".to_string(),
            skills: "N/A".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_insert_is_idempotent_per_key() {
        let mut store = AggregationStore::new();

        assert!(store.insert(record("http://x/1", "First")));
        assert!(!store.insert(record("http://x/1", "Refetched")));
        assert!(store.insert(record("http://x/2", "Second")));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("http://x/1").unwrap().title, "First");
    }

    #[test]
    fn test_keys_in_discovery_order() {
        let mut store = AggregationStore::new();
        for url in ["http://x/3", "http://x/1", "http://x/2"] {
            store.insert(record(url, "t"));
        }

        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(keys, vec!["http://x/3", "http://x/1", "http://x/2"]);
        assert!(store.contains("http://x/1"));
        assert!(!store.contains("http://x/4"));
    }

    #[test]
    fn test_counters() {
        let mut store = AggregationStore::new();
        assert_eq!(store.record_processed(), 1);
        assert_eq!(store.record_processed(), 2);
        assert_eq!(store.record_failure(), 1);

        assert_eq!(store.processed(), 2);
        assert_eq!(store.failures(), 1);
        assert!(store.is_empty());
    }
}
