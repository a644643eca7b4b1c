// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod listing;
mod query;
mod stats;

// Re-export all public types
pub use config::{Config, CrawlerConfig, ExtractionConfig, OutputConfig, SearchConfig};
pub use listing::{ListingRecord, ListingSummary, SearchPage};
pub use query::SearchQuery;
pub use stats::RunSummary;
