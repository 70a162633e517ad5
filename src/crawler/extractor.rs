//! Product extraction from fetched HTML
//!
//! Each field has its own rule, applied independently to the parsed document:
//! - product marker (`<meta property="product:product_link">`) decides whether
//!   the page yields a record at all
//! - first `<h1>` is the title
//! - the price span inside the price action group is the price
//! - the span inside `div.info-sku` is the SKU
//! - each short attribute row in the specification tab is one param
//! - every `<a href>` is a candidate link, product page or not

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

const PRODUCT_MARKER: &str = "meta[property='product:product_link']";
const TITLE: &str = "h1";
const PRICE: &str = "div.price-action-group div[class='price'] span";
const SKU: &str = "div.info-sku span";
const ATTRIBUTE_ROW: &str = "div#tab-specification .short-attribute";
const ATTRIBUTE_NAME: &str = "span.attr-name";
const ATTRIBUTE_VALUE: &str = "span.attr-text";
const ANCHOR: &str = "a[href]";

/// Class markers a price span must carry to count as the price
const PRICE_CLASSES: &[&str] = &["price-new", "autocalc-product-price"];

/// Structured fields scraped from one product page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRecord {
    /// The page the record was scraped from
    pub url: String,
    pub title: String,
    /// Storage key; may be empty when the page has no SKU element
    pub sku: String,
    /// Price text as it appears in the markup, currency symbol included
    pub price: String,
    pub params: BTreeMap<String, String>,
}

/// Result of running every extraction rule over a document
#[derive(Debug, Clone, Default)]
pub struct ExtractedPage {
    /// Present only when the product marker was found
    pub record: Option<ProductRecord>,

    /// Candidate links, in document order
    pub links: Vec<String>,
}

impl ExtractedPage {
    /// Returns true if the page carried the product marker
    pub fn is_product(&self) -> bool {
        self.record.is_some()
    }
}

/// Extracts a product record and candidate links from an HTML document
///
/// Link collection does not depend on the product marker: a page without the
/// marker still reports every anchor it contains.
///
/// # Example
///
/// ```
/// use shelf_crawler::crawler::extract_page;
///
/// let html = r#"<html><head><meta property="product:product_link" content="x"></head>
///     <body><h1>Widget</h1><a href="https://example.com/p/2">next</a></body></html>"#;
/// let page = extract_page(html, "https://example.com/p/1");
/// assert_eq!(page.record.unwrap().title, "Widget");
/// assert_eq!(page.links, vec!["https://example.com/p/2".to_string()]);
/// ```
pub fn extract_page(html: &str, page_url: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    let links = extract_links(&document);

    let record = if has_product_marker(&document) {
        Some(ProductRecord {
            url: page_url.to_string(),
            title: extract_title(&document).unwrap_or_default(),
            sku: extract_sku(&document).unwrap_or_default(),
            price: extract_price(&document).unwrap_or_default(),
            params: extract_params(&document),
        })
    } else {
        None
    };

    ExtractedPage { record, links }
}

fn has_product_marker(document: &Html) -> bool {
    match Selector::parse(PRODUCT_MARKER) {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(_) => false,
    }
}

/// Text of the first heading
fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse(TITLE).ok()?;
    document.select(&selector).next().map(element_text)
}

/// Last price span carrying one of the price class markers
fn extract_price(document: &Html) -> Option<String> {
    let selector = Selector::parse(PRICE).ok()?;
    document
        .select(&selector)
        .filter(|element| {
            element
                .value()
                .classes()
                .any(|class| PRICE_CLASSES.contains(&class))
        })
        .last()
        .map(element_text)
}

/// Last SKU span; later matches overwrite earlier ones
fn extract_sku(document: &Html) -> Option<String> {
    let selector = Selector::parse(SKU).ok()?;
    document.select(&selector).last().map(element_text)
}

/// Attribute rows; a repeated name keeps the last value
fn extract_params(document: &Html) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();

    let (Ok(row_selector), Ok(name_selector), Ok(value_selector)) = (
        Selector::parse(ATTRIBUTE_ROW),
        Selector::parse(ATTRIBUTE_NAME),
        Selector::parse(ATTRIBUTE_VALUE),
    ) else {
        return params;
    };

    for row in document.select(&row_selector) {
        let name = child_text(&row, &name_selector);
        let value = child_text(&row, &value_selector);
        params.insert(name, value);
    }

    params
}

/// Collects every anchor href as written in the markup
///
/// Hrefs are only trimmed. Relative and non-http hrefs are left for the
/// frontier's filter to reject.
fn extract_links(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(ANCHOR) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Trimmed text of every matching descendant, concatenated
fn child_text(element: &ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .map(|child| child.text().collect::<String>().trim().to_string())
        .collect()
}
