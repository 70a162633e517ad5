//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{NewProduct, StoredProduct};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for product storage backends
///
/// Rows are keyed by an identity assigned on insert; SKU is a lookup key but
/// not a uniqueness constraint.
pub trait ProductStore {
    // ===== Crawl Path =====

    /// Inserts a new product row stamped with the current time
    ///
    /// # Returns
    ///
    /// The ID of the newly created row
    fn insert_product(&mut self, product: &NewProduct) -> StorageResult<i64>;

    /// Gets the most recently inserted row with the given SKU
    fn get_product_by_sku(&self, sku: &str) -> StorageResult<Option<StoredProduct>>;

    // ===== Administration =====

    /// Gets a row by ID
    fn get_product(&self, id: i64) -> StorageResult<StoredProduct>;

    /// Changes the SKU of an existing row
    fn update_product_sku(&mut self, id: i64, sku: &str) -> StorageResult<()>;

    /// Deletes a row by ID
    fn delete_product(&mut self, id: i64) -> StorageResult<()>;

    // ===== Statistics =====

    /// Counts all product rows
    fn count_products(&self) -> StorageResult<u64>;

    /// Counts distinct SKUs
    fn count_distinct_skus(&self) -> StorageResult<u64>;
}
