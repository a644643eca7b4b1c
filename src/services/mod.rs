//! Service layer for the crawler application.
//!
//! This module contains the per-listing building blocks:
//! - HTTP fetching (`Fetcher`, `HttpFetcher`)
//! - Content filtering (`ResultFilter`)
//! - Skills extraction (`SkillExtractor`)
//! - Detail page processing (`DetailProcessor`)

mod detail;
mod fetcher;
mod filter;
mod skills;

pub use detail::{DetailOutcome, DetailProcessor};
pub use fetcher::{FetchedPage, Fetcher, HttpFetcher};
pub use filter::ResultFilter;
pub use skills::SkillExtractor;
