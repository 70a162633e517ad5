//! Crawler module for page fetching and product extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching confined to the allowed domain
//! - Product field and link extraction from HTML
//! - The frontier of known URLs and its batch traversal
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod page;

pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use extractor::{extract_page, ExtractedPage, ProductRecord};
pub use fetcher::{build_http_client, fetch_url, FetchError, HttpFetcher};
pub use frontier::Frontier;
pub use page::{PageSource, PageVisit, VisitError};

use crate::config::Config;
use crate::CrawlerError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the product database
/// 2. Build the HTTP client
/// 3. Seed the frontier with the configured start URL
/// 4. Visit pages batch by batch until exhaustion or the page ceiling
/// 5. Store every extracted product record
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed; per-page failures are only logged
/// * `Err(CrawlerError)` - The crawl could not be set up
pub async fn crawl(config: Config) -> Result<CrawlReport, CrawlerError> {
    run_crawl(config).await
}
