//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the ProductStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ProductStore, StorageError, StorageResult};
use crate::storage::{NewProduct, StoredProduct};
use crate::CrawlerError;
use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;

const PRODUCT_COLUMNS: &str = "id, time, sku, url, title, price, params";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(CrawlerError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, CrawlerError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Opens a database that must already exist
    ///
    /// Used by the read-only commands, which must not leave an empty database
    /// file behind when pointed at the wrong path.
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened database
    /// * `Err(CrawlerError)` - No database file at `path`, or it could not be opened
    pub fn open_existing(path: &Path) -> Result<Self, CrawlerError> {
        if !path.is_file() {
            return Err(StorageError::DatabaseNotFound(path.display().to_string()).into());
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> Result<Self, CrawlerError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

/// Maps a row selected with `PRODUCT_COLUMNS`
fn product_from_row(row: &Row<'_>) -> rusqlite::Result<StoredProduct> {
    Ok(StoredProduct {
        id: row.get(0)?,
        time: row.get(1)?,
        sku: row.get(2)?,
        url: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        title: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        price: row.get(5)?,
        params: row
            .get::<_, Option<String>>(6)?
            .unwrap_or_else(|| "{}".to_string()),
    })
}

impl ProductStore for SqliteStorage {
    // ===== Crawl Path =====

    fn insert_product(&mut self, product: &NewProduct) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO product_data (time, sku, url, title, price, params) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                now,
                product.sku,
                product.url,
                product.title,
                product.price,
                product.params
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_product_by_sku(&self, sku: &str) -> StorageResult<Option<StoredProduct>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM product_data WHERE sku = ?1 ORDER BY id DESC LIMIT 1",
            PRODUCT_COLUMNS
        ))?;

        let product = stmt
            .query_row(params![sku], product_from_row)
            .optional()?;

        Ok(product)
    }

    // ===== Administration =====

    fn get_product(&self, id: i64) -> StorageResult<StoredProduct> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM product_data WHERE id = ?1",
            PRODUCT_COLUMNS
        ))?;

        stmt.query_row(params![id], product_from_row)
            .optional()?
            .ok_or(StorageError::ProductNotFound(id))
    }

    fn update_product_sku(&mut self, id: i64, sku: &str) -> StorageResult<()> {
        let changed = self.conn.execute(
            "UPDATE product_data SET sku = ?1 WHERE id = ?2",
            params![sku, id],
        )?;

        if changed == 0 {
            return Err(StorageError::ProductNotFound(id));
        }
        Ok(())
    }

    fn delete_product(&mut self, id: i64) -> StorageResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM product_data WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(StorageError::ProductNotFound(id));
        }
        Ok(())
    }

    // ===== Statistics =====

    fn count_products(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM product_data", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_distinct_skus(&self) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT sku) FROM product_data",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
