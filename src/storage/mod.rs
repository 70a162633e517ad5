//! Storage module for persisting extracted products
//!
//! This module handles all database operations for the crawler, including:
//! - SQLite database initialization and schema management
//! - Product row insertion and lookup by SKU
//! - Administrative update and delete outside the crawl path
//! - The gateway mapping extracted records to stored rows

mod gateway;
mod schema;
mod sqlite;
mod traits;

pub use gateway::{format_price, parse_price, GatewayError, ProductGateway};
pub use sqlite::SqliteStorage;
pub use traits::{ProductStore, StorageError, StorageResult};

use chrono::{DateTime, Utc};

/// A product row ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub sku: String,
    pub url: String,
    pub title: String,
    pub price: f64,
    /// JSON object text
    pub params: String,
}

/// Represents a product row in the database
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProduct {
    pub id: i64,
    /// RFC 3339 insert time
    pub time: String,
    pub sku: String,
    pub url: String,
    pub title: String,
    pub price: f64,
    /// JSON object text
    pub params: String,
}

impl StoredProduct {
    /// Parses the insert time
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.time)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(time: &str) -> StoredProduct {
        StoredProduct {
            id: 1,
            time: time.to_string(),
            sku: "A1".to_string(),
            url: String::new(),
            title: String::new(),
            price: 0.0,
            params: "{}".to_string(),
        }
    }

    #[test]
    fn test_timestamp_parses_rfc3339() {
        let product = stored("2024-05-01T10:30:00+00:00");
        let timestamp = product.timestamp().unwrap();
        assert_eq!(timestamp.to_rfc3339(), "2024-05-01T10:30:00+00:00");
    }

    #[test]
    fn test_timestamp_invalid() {
        assert_eq!(stored("yesterday").timestamp(), None);
    }
}
