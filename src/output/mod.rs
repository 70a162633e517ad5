//! Output module for presenting crawl results
//!
//! This module handles:
//! - Rendering one line per extracted product record
//! - Summarizing a finished crawl
//! - Reporting statistics from the product database

pub mod stats;

pub use stats::{load_statistics, print_statistics, CrawlStatistics};

use crate::crawler::{CrawlReport, ProductRecord};
use std::collections::BTreeMap;

/// Renders the params map as a JSON object
fn format_params(params: &BTreeMap<String, String>) -> String {
    serde_json::to_string(params).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a record as `url title sku price params`
///
/// # Examples
///
/// ```
/// use shelf_crawler::output::format_record_line;
/// use shelf_crawler::ProductRecord;
///
/// let record = ProductRecord {
///     url: "https://example.com/p/1".to_string(),
///     title: "Widget".to_string(),
///     sku: "SKU123".to_string(),
///     price: "$19.99".to_string(),
///     params: Default::default(),
/// };
/// assert_eq!(
///     format_record_line(&record),
///     "https://example.com/p/1 Widget SKU123 $19.99 {}"
/// );
/// ```
pub fn format_record_line(record: &ProductRecord) -> String {
    format!(
        "{} {} {} {} {}",
        record.url,
        record.title,
        record.sku,
        record.price,
        format_params(&record.params)
    )
}

/// Prints one line per record to stdout
pub fn print_records(records: &[ProductRecord]) {
    for record in records {
        println!("{}", format_record_line(record));
    }
}

/// Prints the closing summary of a crawl
pub fn print_report(report: &CrawlReport) {
    println!();
    println!("=== Crawl Summary ===");
    println!("  Pages visited: {}", report.pages_visited);
    println!("  URLs discovered: {}", report.urls_known);
    println!("  Products extracted: {}", report.records.len());
    println!("  Products stored: {}", report.records_stored);
    if report.records_not_stored > 0 {
        println!("  Products not stored: {}", report.records_not_stored);
    }
}
