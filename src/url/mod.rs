//! URL handling module for Shelf-Crawler
//!
//! This module provides domain extraction, the deny-list filter, and the
//! link classification the frontier uses to decide what it follows.

mod domain;
mod filter;

use crate::config::CrawlerConfig;

// Re-export main functions
pub use domain::{ensure_allowed_domain, extract_domain, parse_http_url};
pub use filter::{is_filterable, is_filterable_with};

/// How a discovered link is treated by the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClassification {
    /// Link passes every check and is seeded
    Admitted,
    /// Link is empty, lacks the http token, or matches a skip pattern
    Skipped,
    /// Link is an http URL on another domain
    OffDomain,
    /// Link passed the filter but could not be parsed as an http URL
    Unparseable,
}

impl LinkClassification {
    /// Returns true if the link should be seeded into the frontier
    pub fn should_follow(&self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// Admission rules for discovered links: deny-list plus single-domain scope
#[derive(Debug, Clone)]
pub struct LinkFilter {
    allowed_domain: String,
    skip_patterns: Vec<String>,
}

impl LinkFilter {
    /// Creates a filter for the given domain and skip patterns
    pub fn new(allowed_domain: impl Into<String>, skip_patterns: Vec<String>) -> Self {
        Self {
            allowed_domain: allowed_domain.into().to_lowercase(),
            skip_patterns,
        }
    }

    /// Builds the filter from crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.allowed_domain.clone(), config.skip_patterns.clone())
    }

    /// The domain links must belong to
    pub fn allowed_domain(&self) -> &str {
        &self.allowed_domain
    }

    /// Classifies a discovered link
    ///
    /// The deny-list check runs first, on the raw string; only links that pass
    /// it are parsed and checked against the allowed domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelf_crawler::url::{LinkClassification, LinkFilter};
    ///
    /// let filter = LinkFilter::new("example.com", vec!["image".to_string()]);
    /// assert_eq!(filter.classify("https://example.com/p/1"), LinkClassification::Admitted);
    /// assert_eq!(filter.classify("https://example.com/image/a.png"), LinkClassification::Skipped);
    /// assert_eq!(filter.classify("https://other.com/p/1"), LinkClassification::OffDomain);
    /// ```
    pub fn classify(&self, link: &str) -> LinkClassification {
        if !is_filterable_with(link, &self.skip_patterns) {
            return LinkClassification::Skipped;
        }

        let url = match parse_http_url(link) {
            Ok(url) => url,
            Err(_) => return LinkClassification::Unparseable,
        };

        match ensure_allowed_domain(&url, &self.allowed_domain) {
            Ok(()) => LinkClassification::Admitted,
            Err(_) => LinkClassification::OffDomain,
        }
    }
}
