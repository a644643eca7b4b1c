//! Job Listing Crawler CLI
//!
//! Local execution entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use listing_crawler::{
    error::Result,
    models::{Config, SearchQuery},
    pipeline,
    services::HttpFetcher,
    storage::LocalSink,
};

/// listing-crawler - Job Listing Crawler
#[derive(Parser, Debug)]
#[command(
    name = "listing-crawler",
    version,
    about = "Pulls job postings and records the ones not seen before"
)]
struct Cli {
    /// Path to storage directory containing config and listings
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl postings and append new ones to the listings file
    Crawl {
        /// Keyword to search postings for, e.g. 'java' or 'ruby'
        #[arg(short, long)]
        search: String,

        /// How many days back postings are fetched
        #[arg(short, long)]
        age_of_postings: Option<u32>,

        /// How many result pages to traverse
        #[arg(short = 'd', long)]
        traverse_depth: Option<u32>,

        /// Pattern every posting page must match (repeatable)
        #[arg(short = 'r', long = "page-search")]
        page_search: Vec<String>,
    },

    /// Validate configuration file
    Validate,

    /// Show recorded listings info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    let sink = LocalSink::in_dir(&cli.storage_dir, &config.output.records_file);

    match cli.command {
        Command::Crawl {
            search,
            age_of_postings,
            traverse_depth,
            page_search,
        } => {
            config.validate()?;

            let mut query = SearchQuery::new(search, &config.search);
            if let Some(age) = age_of_postings {
                query.age_days = age;
            }
            if let Some(depth) = traverse_depth {
                query.traversal_depth = depth;
            }
            query.content_filters.extend(page_search);

            let fetcher = Arc::new(HttpFetcher::new(&config.crawler)?);
            let summary = pipeline::run_crawler(&config, &query, fetcher, &sink)
                .await
                .inspect_err(|e| log::error!("Crawl failed for {query}: {e}"))?;

            if summary.failures > 0 {
                log::warn!("{} postings dropped after fetch failures", summary.failures);
            }
            log::info!("Crawl complete!");
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!(
                "Config: {}",
                if config_path.exists() {
                    "exists"
                } else {
                    "not found (using defaults)"
                }
            );

            let records = sink.load().await?;
            log::info!(
                "Recorded listings: {} ({})",
                records.len(),
                sink.path().display()
            );
            if let Some(last) = records.last() {
                log::info!("Most recent: {} - {} ({})", last.date, last.title, last.company);
            }
        }
    }

    Ok(())
}
