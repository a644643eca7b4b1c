//! Pipeline entry points for crawler operations.
//!
//! - `Paginator`: Traverse result pages and aggregate kept listings
//! - `DedupMerger`: Drop listings the sink already holds
//! - `run_crawler`: Paginate, merge and append in one run

pub mod crawl;
pub mod merge;
pub mod page;
pub mod paginate;
pub mod store;

pub use crawl::run_crawler;
pub use merge::{DedupMerger, merge_new};
pub use page::{PageProcessor, PageReport};
pub use paginate::Paginator;
pub use store::AggregationStore;
