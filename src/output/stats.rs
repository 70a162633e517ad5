//! Statistics generation from the product database
//!
//! This module provides functionality for extracting and displaying
//! product statistics from the storage layer.

use crate::storage::ProductStore;
use crate::CrawlerError;

/// Product database statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Total number of stored product rows
    pub total_products: u64,

    /// Number of distinct SKUs across all rows
    pub distinct_skus: u64,
}

impl CrawlStatistics {
    /// Rows that repeat an already-stored SKU
    pub fn repeated_rows(&self) -> u64 {
        self.total_products.saturating_sub(self.distinct_skus)
    }
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Successfully loaded statistics
/// * `Err(CrawlerError)` - Failed to query statistics
pub fn load_statistics(storage: &impl ProductStore) -> Result<CrawlStatistics, CrawlerError> {
    let total_products = storage.count_products()?;
    let distinct_skus = storage.count_distinct_skus()?;

    Ok(CrawlStatistics {
        total_products,
        distinct_skus,
    })
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Product Statistics ===\n");

    println!("Overview:");
    println!("  Stored rows: {}", stats.total_products);
    println!("  Distinct SKUs: {}", stats.distinct_skus);

    if stats.repeated_rows() > 0 {
        let percentage = (stats.repeated_rows() as f64 / stats.total_products as f64) * 100.0;
        println!(
            "  Rows repeating a SKU: {} ({:.1}%)",
            stats.repeated_rows(),
            percentage
        );
    }
}
