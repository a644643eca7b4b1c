//! Application configuration structures.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Default search parameters
    #[serde(default)]
    pub search: SearchConfig,

    /// Detail page field extraction rules
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        Url::parse(&self.crawler.base_url).map_err(|e| {
            AppError::validation(format!(
                "crawler.base_url '{}' is not a valid URL: {e}",
                self.crawler.base_url
            ))
        })?;
        if self.search.traversal_depth == 0 {
            return Err(AppError::validation("search.traversal_depth must be > 0"));
        }
        if self.extraction.skills_patterns.is_empty() {
            return Err(AppError::validation("extraction.skills_patterns is empty"));
        }
        for pattern in self
            .search
            .content_filters
            .iter()
            .chain(&self.extraction.skills_patterns)
        {
            Regex::new(pattern).map_err(|e| AppError::pattern(pattern, e))?;
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Search API endpoint
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent detail fetches per page
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Transport failures tolerated across a run before aborting
    #[serde(default = "defaults::max_detail_failures")]
    pub max_detail_failures: usize,

    /// Stop paging once a page reports its last document is the final one
    #[serde(default)]
    pub stop_at_last_document: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            max_detail_failures: defaults::max_detail_failures(),
            stop_at_last_document: false,
        }
    }
}

/// Default search parameters, overridable from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// How many days back postings are fetched
    #[serde(default = "defaults::age_days")]
    pub age_days: u32,

    /// Number of result pages to traverse
    #[serde(default = "defaults::traversal_depth")]
    pub traversal_depth: u32,

    /// Patterns every detail page must match
    #[serde(default)]
    pub content_filters: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            age_days: defaults::age_days(),
            traversal_depth: defaults::traversal_depth(),
            content_filters: Vec::new(),
        }
    }
}

/// Rules for pulling the skills block out of a detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Regexes whose capture groups hold the skills value
    #[serde(default = "defaults::skills_patterns")]
    pub skills_patterns: Vec<String>,

    /// Literal tokens removed from the extracted value
    #[serde(default = "defaults::strip_tokens")]
    pub strip_tokens: Vec<String>,

    /// Value used when no skills block is present
    #[serde(default = "defaults::default_value")]
    pub default_value: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            skills_patterns: defaults::skills_patterns(),
            strip_tokens: defaults::strip_tokens(),
            default_value: defaults::default_value(),
        }
    }
}

/// Output file locations, relative to the storage directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::records_file")]
    pub records_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            records_file: defaults::records_file(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn base_url() -> String {
        "http://service.dice.com/api/rest/jobsearch/v1/simple.json".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; listing-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        50
    }
    pub fn max_detail_failures() -> usize {
        25
    }

    // Search defaults
    pub fn age_days() -> u32 {
        1
    }
    pub fn traversal_depth() -> u32 {
        1
    }

    // Extraction defaults
    pub fn skills_patterns() -> Vec<String> {
        vec![
            r"<dt[^>]*>\s*Skills:\s*</dt>\s*<dd[^>]*>(.*?)</dd>".into(),
            r"Skills:\s*(?:</[^>]+>\s*)?(?:<[^>]+>\s*)*([^<\r\n]+)".into(),
        ]
    }
    pub fn strip_tokens() -> Vec<String> {
        vec!["&nbsp;".into()]
    }
    pub fn default_value() -> String {
        "N/A".into()
    }

    // Output defaults
    pub fn records_file() -> String {
        "listings.json".into()
    }
}
