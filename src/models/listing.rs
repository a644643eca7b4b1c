//! Listing data structures.

use serde::{Deserialize, Serialize};

/// One page of search results as returned by the search API.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// Total postings matching the query
    pub count: u64,

    /// Index of the last posting on this page
    pub last_document: u64,

    /// Listings on this page
    pub result_item_list: Vec<ListingSummary>,
}

/// One entry from a search-result page.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListingSummary {
    /// Detail page URL, unique per listing
    #[serde(rename = "detailUrl")]
    pub detail_url: String,

    #[serde(rename = "jobTitle")]
    pub title: String,

    pub company: String,

    pub location: String,

    /// Posting date as reported by the API
    pub date: String,
}

/// A listing that passed filtering, ready to be recorded.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListingRecord {
    pub date: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub skills: String,
    pub url: String,
}

impl ListingRecord {
    /// Build a record from a summary and the skills pulled from its detail page.
    pub fn from_summary(summary: &ListingSummary, skills: String) -> Self {
        Self {
            date: summary.date.clone(),
            title: summary.title.clone(),
            company: summary.company.clone(),
            location: summary.location.clone(),
            skills,
            url: summary.detail_url.clone(),
        }
    }

    /// Key used for deduplication.
    pub fn key(&self) -> &str {
        &self.url
    }
}
