//! Database schema definitions
//!
//! This module contains the SQL schema for the Shelf-Crawler product database.

/// SQL schema for the database
///
/// SKU is indexed but deliberately not unique: every successful extraction
/// inserts a new row.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS product_data (
    id INTEGER NOT NULL PRIMARY KEY,
    time DATETIME NOT NULL,
    sku VARCHAR(255) NOT NULL,
    url TEXT,
    title TEXT,
    price DECIMAL(10,2) NOT NULL,
    params JSONB
);

CREATE INDEX IF NOT EXISTS idx_product_data_sku ON product_data(sku);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_initializes() {
        let conn = Connection::open_in_memory().unwrap();
        let result = initialize_schema(&conn);
        assert!(result.is_ok());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize_schema(&conn).unwrap();
        let result = initialize_schema(&conn);

        assert!(result.is_ok());
    }

    #[test]
    fn test_product_table_exists_after_init() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='product_data'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_sku_is_not_unique() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        for _ in 0..2 {
            conn.execute(
                "INSERT INTO product_data (time, sku, price) VALUES ('2024-01-01T00:00:00Z', 'A1', 1.5)",
                [],
            )
            .unwrap();
        }
    }
}
