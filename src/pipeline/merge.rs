//! Deduplication against previously recorded listings.
//!
//! Computes which aggregated records are new relative to the keys a sink
//! already holds, so only unseen listings are appended.

use std::collections::HashSet;

use crate::models::ListingRecord;
use crate::pipeline::AggregationStore;

/// Merger yielding only the records a sink has not seen yet.
#[derive(Debug, Clone, Default)]
pub struct DedupMerger;

impl DedupMerger {
    pub fn new() -> Self {
        Self
    }

    /// Records in `aggregated` whose key is not in `existing`, in discovery order.
    pub fn merge(
        &self,
        aggregated: &AggregationStore,
        existing: &HashSet<String>,
    ) -> Vec<ListingRecord> {
        aggregated
            .records()
            .iter()
            .filter(|record| !existing.contains(record.key()))
            .cloned()
            .collect()
    }
}

/// Convenience function to compute the new records.
pub fn merge_new(aggregated: &AggregationStore, existing: &HashSet<String>) -> Vec<ListingRecord> {
    DedupMerger::new().merge(aggregated, existing)
}
