//! Shelf-Crawler: a single-site product page harvester
//!
//! This crate crawls one website by following anchor links, recognises
//! product detail pages by a marker tag, extracts title, SKU, price and
//! attribute fields from them, and stores each record in SQLite keyed by SKU.

pub mod config;
pub mod crawler;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Shelf-Crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Domain {domain} is outside the allowed domain {allowed}")]
    DomainNotAllowed { domain: String, allowed: String },
}

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, Frontier, ProductRecord};
pub use url::{extract_domain, is_filterable};
