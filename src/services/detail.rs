// src/services/detail.rs

//! Per-listing detail processing.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{ListingRecord, ListingSummary};
use crate::services::{Fetcher, ResultFilter, SkillExtractor};

/// What happened to a single listing.
#[derive(Debug)]
pub enum DetailOutcome {
    /// The detail page passed the filter.
    Kept(ListingRecord),
    /// The detail page did not match the content filter.
    Filtered,
    /// The detail URL was malformed.
    Skipped,
    /// The detail fetch failed at the transport level.
    Failed(AppError),
}

/// Fetches a listing's detail page, filters it and extracts its record.
pub struct DetailProcessor {
    fetcher: Arc<dyn Fetcher>,
    filter: ResultFilter,
    extractor: SkillExtractor,
}

impl DetailProcessor {
    pub fn new(fetcher: Arc<dyn Fetcher>, filter: ResultFilter, extractor: SkillExtractor) -> Self {
        Self {
            fetcher,
            filter,
            extractor,
        }
    }

    /// Process one listing.
    ///
    /// Invalid URLs and transport failures are contained in the returned
    /// outcome; only unexpected errors are returned as `Err`.
    pub async fn process(&self, listing: &ListingSummary) -> Result<DetailOutcome> {
        let page = match self.fetcher.fetch(&listing.detail_url, &[]).await {
            Ok(page) => page,
            Err(error) if error.is_recoverable() => {
                log::warn!("Failed parsing URL: {error}");
                return Ok(DetailOutcome::Skipped);
            }
            Err(error @ AppError::Transport { .. }) => return Ok(DetailOutcome::Failed(error)),
            Err(error) => return Err(error),
        };

        if !self.filter.matches(Some(&page)) {
            return Ok(DetailOutcome::Filtered);
        }

        let skills = self.extractor.extract(&page.body);
        Ok(DetailOutcome::Kept(ListingRecord::from_summary(listing, skills)))
    }
}
