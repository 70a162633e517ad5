//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from seed URL to stored rows.

use shelf_crawler::config::{CeilingMode, Config, CrawlerConfig, OutputConfig};
use shelf_crawler::crawler::Coordinator;
use shelf_crawler::storage::{ProductGateway, ProductStore, SqliteStorage};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling the mock server
fn create_test_config(base_url: &str, db_path: &Path, max_pages: u32) -> Config {
    let domain = url::Url::parse(base_url)
        .expect("Failed to parse base URL")
        .host_str()
        .expect("Failed to extract host")
        .to_string();

    Config {
        crawler: CrawlerConfig {
            seed_url: format!("{}/", base_url),
            allowed_domain: domain,
            max_pages,
            request_timeout_secs: 5,
            ..Default::default()
        },
        output: OutputConfig {
            database_path: db_path.to_string_lossy().to_string(),
        },
        ..Default::default()
    }
}

fn product_page(title: &str, sku: &str, price: &str, links: &[String]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<a href="{}">link</a>"#, l))
        .collect();

    format!(
        r#"<html><head><meta property="product:product_link" content="x"></head><body>
        <h1>{title}</h1>
        <div class="info-sku"><span>{sku}</span></div>
        <div class="price-action-group"><div class="price"><span class="price-new">{price}</span></div></div>
        <div id="tab-specification">
            <div class="short-attribute"><span class="attr-name">Color</span><span class="attr-text">Red</span></div>
            <div class="short-attribute"><span class="attr-name">Size</span><span class="attr-text">M</span></div>
        </div>
        {anchors}
        </body></html>"#
    )
}

fn listing_page(links: &[String]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<a href="{}">link</a>"#, l))
        .collect();
    format!("<html><body><h1>Catalog</h1>{}</body></html>", anchors)
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_product_page_and_link() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        product_page("Widget", "SKU123", "$19.99", &[format!("{}/about", base_url)]),
    )
    .await;
    mount_page(&mock_server, "/about", listing_page(&[format!("{}/", base_url)])).await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("products.db");
    let config = create_test_config(&base_url, &db_path, 5);

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.pages_visited, 2);
    assert_eq!(coordinator.frontier().visited_count(), 2);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records_stored, 1);

    let record = &report.records[0];
    assert_eq!(record.url, format!("{}/", base_url));
    assert_eq!(record.title, "Widget");
    assert_eq!(record.price, "$19.99");
    assert_eq!(record.params.get("Color").map(String::as_str), Some("Red"));
    assert_eq!(record.params.get("Size").map(String::as_str), Some("M"));
    drop(coordinator);

    // Rows survive the crawl
    let gateway = ProductGateway::new(SqliteStorage::new(&db_path).unwrap());
    assert_eq!(gateway.store().count_products().unwrap(), 1);
    let stored = gateway.get("SKU123").unwrap();
    assert_eq!(stored.title, "Widget");
    assert_eq!(stored.price, "19.99");
    assert_eq!(stored.params, record.params);
}

#[tokio::test]
async fn test_missing_pages_are_visited_without_records() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // /missing is not mounted, so the mock server answers 404
    mount_page(
        &mock_server,
        "/",
        listing_page(&[
            format!("{}/missing", base_url),
            format!("{}/product", base_url),
        ]),
    )
    .await;
    mount_page(
        &mock_server,
        "/product",
        product_page("Gadget", "SKU456", "25", &[]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&base_url, &dir.path().join("products.db"), 5);

    let mut coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.pages_visited, 3);
    assert!(coordinator
        .frontier()
        .is_visited(&format!("{}/missing", base_url)));
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].sku, "SKU456");
    assert_eq!(coordinator.gateway().get("SKU456").unwrap().price, "25");
}

#[tokio::test]
async fn test_relative_links_are_not_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        listing_page(&["/relative-product".to_string(), "relative-page".to_string()]),
    )
    .await;

    // A relative href has no "http" in it and must never be fetched
    Mock::given(method("GET"))
        .and(path("/relative-product"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("Gadget", "SKU456", "25", &[])),
        )
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&base_url, &dir.path().join("products.db"), 5);

    let mut coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.urls_known, 1);
    assert!(report.records.is_empty());
    assert_eq!(coordinator.gateway().store().count_products().unwrap(), 0);
}

#[tokio::test]
async fn test_filtered_and_off_domain_links_not_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = url::Url::parse(&base_url).unwrap().port().unwrap();

    mount_page(
        &mock_server,
        "/",
        listing_page(&[
            format!("{}/image/logo.png", base_url),
            format!("{}/page?cache=1", base_url),
            "https://t.me/shop".to_string(),
            format!("http://localhost:{}/elsewhere", port),
        ]),
    )
    .await;

    // None of the links may reach the server
    Mock::given(method("GET"))
        .and(path("/image/logo.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&base_url, &dir.path().join("products.db"), 5);

    let mut coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.urls_known, 1);
    assert!(report.records.is_empty());
}

#[tokio::test]
async fn test_unpriced_product_is_extracted_but_not_stored() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        product_page("Widget", "SKU789", "Call for price", &[]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&base_url, &dir.path().join("products.db"), 5);

    let mut coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records_stored, 0);
    assert_eq!(report.records_not_stored, 1);
    assert_eq!(coordinator.gateway().store().count_products().unwrap(), 0);
}

#[tokio::test]
async fn test_page_ceiling_modes() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        listing_page(&[
            format!("{}/1", base_url),
            format!("{}/2", base_url),
            format!("{}/3", base_url),
        ]),
    )
    .await;
    mount_page(&mock_server, "/1", listing_page(&[format!("{}/4", base_url)])).await;
    for page in ["/2", "/3", "/4"] {
        mount_page(&mock_server, page, listing_page(&[])).await;
    }

    let dir = tempfile::tempdir().unwrap();

    // Batch mode finishes the batch that crosses the ceiling
    let config = create_test_config(&base_url, &dir.path().join("batch.db"), 1);
    let mut coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run().await.unwrap();
    assert_eq!(report.pages_visited, 4);
    assert!(coordinator.frontier().has_unvisited());

    // Exact mode never visits more pages than the ceiling
    let mut config = create_test_config(&base_url, &dir.path().join("exact.db"), 2);
    config.crawler.ceiling_mode = CeilingMode::Exact;
    let mut coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run().await.unwrap();
    assert_eq!(report.pages_visited, 2);
}
