//! Mapping between extracted records and stored product rows
//!
//! On the way in, the scraped price text is reduced to a number and the
//! attribute map is serialized to JSON. On the way out, the number is rendered
//! back to text and the JSON is decoded.
//!
//! Price parsing is best-effort: the first float-like run of characters is
//! taken as the price. Comma-grouped amounts such as `$1,234.56` are a known
//! gap and parse as `1`; they are logged when seen.

use crate::crawler::ProductRecord;
use crate::storage::traits::{ProductStore, StorageError};
use crate::storage::NewProduct;
use regex::Regex;
use std::collections::BTreeMap;
use std::num::ParseFloatError;
use std::sync::LazyLock;
use thiserror::Error;

static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?[0-9]*\.?[0-9]+").expect("price pattern is valid"));

static DIGIT_GROUPING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9],[0-9]{3}").expect("grouping pattern is valid"));

/// Errors from the persistence boundary
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid price '{text}': {source}")]
    Price {
        text: String,
        source: ParseFloatError,
    },

    #[error("Invalid product params: {0}")]
    Params(#[from] serde_json::Error),

    #[error("No product stored for SKU {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Extracts the first float-like number from price text
///
/// Returns `Ok(None)` when the text contains no number at all.
///
/// # Examples
///
/// ```
/// use shelf_crawler::storage::parse_price;
///
/// assert_eq!(parse_price("$19.99").unwrap(), Some(19.99));
/// assert_eq!(parse_price("Call for price").unwrap(), None);
/// ```
pub fn parse_price(text: &str) -> Result<Option<f64>, GatewayError> {
    let Some(found) = PRICE_PATTERN.find(text) else {
        return Ok(None);
    };

    if DIGIT_GROUPING.is_match(text) {
        tracing::warn!(
            "Price '{}' uses digit grouping; only '{}' is recorded",
            text,
            found.as_str()
        );
    }

    found
        .as_str()
        .parse::<f64>()
        .map(Some)
        .map_err(|source| GatewayError::Price {
            text: text.to_string(),
            source,
        })
}

/// Renders a stored price the way it is shown back to callers
///
/// Whole numbers have no fractional part (`20`), others use the shortest
/// representation (`19.99`).
pub fn format_price(price: f64) -> String {
    format!("{}", price)
}

/// Persistence gateway keyed by SKU
pub struct ProductGateway<S: ProductStore> {
    store: S,
}

impl<S: ProductStore> ProductGateway<S> {
    /// Wraps a product store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stores an extracted record and returns the new row ID
    ///
    /// A price without any number is not an error: nothing is stored and the
    /// returned ID is 0. Records are never deduplicated by SKU.
    pub fn put(&mut self, record: &ProductRecord) -> Result<i64, GatewayError> {
        let Some(price) = parse_price(&record.price)? else {
            tracing::warn!(
                "No numeric price in '{}' for SKU {} ({}); record not stored",
                record.price,
                record.sku,
                record.url
            );
            return Ok(0);
        };

        let params = serde_json::to_string(&record.params)?;

        let id = self.store.insert_product(&NewProduct {
            sku: record.sku.clone(),
            url: record.url.clone(),
            title: record.title.clone(),
            price,
            params,
        })?;

        tracing::debug!("Stored SKU {} as product {}", record.sku, id);
        Ok(id)
    }

    /// Loads the most recent record stored for a SKU
    pub fn get(&self, sku: &str) -> Result<ProductRecord, GatewayError> {
        let product = self
            .store
            .get_product_by_sku(sku)?
            .ok_or_else(|| GatewayError::NotFound(sku.to_string()))?;

        let params: Option<BTreeMap<String, String>> = serde_json::from_str(&product.params)?;

        Ok(ProductRecord {
            url: product.url,
            title: product.title,
            sku: product.sku,
            price: format_price(product.price),
            params: params.unwrap_or_default(),
        })
    }

    /// Changes the SKU of a stored row (administrative)
    pub fn update_sku(&mut self, id: i64, sku: &str) -> Result<(), GatewayError> {
        self.store.update_product_sku(id, sku)?;
        Ok(())
    }

    /// Deletes a stored row (administrative)
    pub fn delete(&mut self, id: i64) -> Result<(), GatewayError> {
        self.store.delete_product(id)?;
        Ok(())
    }
}
