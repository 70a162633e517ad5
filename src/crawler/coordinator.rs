//! Crawler coordinator - main crawl orchestration logic
//!
//! This module builds the context for one crawl and drives it:
//! - Opening storage and building the HTTP fetcher
//! - Seeding the frontier with the configured start URL
//! - Running the frontier and persisting each extracted record
//! - Reporting what the run visited and stored

use crate::config::Config;
use crate::crawler::extractor::ProductRecord;
use crate::crawler::fetcher::HttpFetcher;
use crate::crawler::frontier::Frontier;
use crate::crawler::page::PageSource;
use crate::storage::{ProductGateway, ProductStore, SqliteStorage};
use crate::url::LinkFilter;
use crate::CrawlerError;
use std::path::Path;

/// Summary of a finished crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Records extracted, in visit order
    pub records: Vec<ProductRecord>,

    /// Pages that transitioned to visited
    pub pages_visited: usize,

    /// URLs known to the frontier at the end of the run
    pub urls_known: usize,

    /// Records written to storage
    pub records_stored: usize,

    /// Records dropped at the persistence boundary (no price or write error)
    pub records_not_stored: usize,
}

/// Main crawler coordinator structure
///
/// Owns everything one crawl needs; nothing is shared between crawls.
pub struct Coordinator<P: PageSource = HttpFetcher, S: ProductStore = SqliteStorage> {
    config: Config,
    frontier: Frontier,
    source: P,
    gateway: ProductGateway<S>,
}

impl Coordinator<HttpFetcher, SqliteStorage> {
    /// Creates a coordinator that fetches over HTTP and stores to the
    /// configured SQLite database
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlerError)` - The database could not be opened or the HTTP
    ///   client could not be built
    pub fn new(config: Config) -> Result<Self, CrawlerError> {
        let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;
        let fetcher = HttpFetcher::from_config(&config)?;
        Ok(Self::with_parts(config, fetcher, storage))
    }
}

impl<P: PageSource, S: ProductStore> Coordinator<P, S> {
    /// Creates a coordinator from an explicit page source and store
    pub fn with_parts(config: Config, source: P, store: S) -> Self {
        let frontier = Frontier::new(LinkFilter::from_config(&config.crawler));

        Self {
            config,
            frontier,
            source,
            gateway: ProductGateway::new(store),
        }
    }

    /// The frontier state of this crawl
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// The persistence gateway of this crawl
    pub fn gateway(&self) -> &ProductGateway<S> {
        &self.gateway
    }

    /// Runs the crawl
    ///
    /// Per-page failures and persistence failures are logged and never stop
    /// the run.
    pub async fn run(&mut self) -> Result<CrawlReport, CrawlerError> {
        let crawler = &self.config.crawler;
        tracing::info!(
            "Starting crawl of {} (domain {}, ceiling {} pages, {:?} mode)",
            crawler.seed_url,
            crawler.allowed_domain,
            crawler.max_pages,
            crawler.ceiling_mode
        );

        let start_time = std::time::Instant::now();
        self.frontier.seed(&crawler.seed_url);

        let gateway = &mut self.gateway;
        let mut records_stored = 0;
        let mut records_not_stored = 0;

        let records = self
            .frontier
            .run(crawler.max_pages, crawler.ceiling_mode, &self.source, |record| {
                match gateway.put(record) {
                    Ok(0) => records_not_stored += 1,
                    Ok(_) => records_stored += 1,
                    Err(e) => {
                        tracing::warn!("Failed to store SKU {} from {}: {}", record.sku, record.url, e);
                        records_not_stored += 1;
                    }
                }
            })
            .await;

        let report = CrawlReport {
            records,
            pages_visited: self.frontier.visited_count(),
            urls_known: self.frontier.len(),
            records_stored,
            records_not_stored,
        };

        tracing::info!(
            "Crawl completed: {} pages visited, {} products extracted, {} stored in {:?}",
            report.pages_visited,
            report.records.len(),
            report.records_stored,
            start_time.elapsed()
        );

        Ok(report)
    }
}

/// Runs a complete crawl with the given configuration
///
/// # Example
///
/// ```no_run
/// use shelf_crawler::config::Config;
/// use shelf_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(Config::default()).await?;
/// println!("{} products", report.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport, CrawlerError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
