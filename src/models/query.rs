//! Search query parameters for a single run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::SearchConfig;

/// Parameters of one crawl. Immutable for the duration of the run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search keyword sent as `text`
    pub keyword: String,

    /// How many days back postings are fetched
    pub age_days: u32,

    /// Number of result pages to traverse
    pub traversal_depth: u32,

    /// Patterns every detail page must match
    pub content_filters: Vec<String>,
}

impl SearchQuery {
    /// Create a query for `keyword` using configured defaults for the rest.
    pub fn new(keyword: impl Into<String>, defaults: &SearchConfig) -> Self {
        Self {
            keyword: keyword.into(),
            age_days: defaults.age_days,
            traversal_depth: defaults.traversal_depth,
            content_filters: defaults.content_filters.clone(),
        }
    }

    /// Query-string parameters for result page `page` (1-based).
    pub fn page_params(&self, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("text", self.keyword.clone()),
            ("age", self.age_days.to_string()),
            ("page", page.to_string()),
            ("sort", "1".to_string()),
        ]
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "text={:?} age={} depth={}",
            self.keyword, self.age_days, self.traversal_depth
        )?;
        if !self.content_filters.is_empty() {
            write!(f, " filters={:?}", self.content_filters)?;
        }
        Ok(())
    }
}
