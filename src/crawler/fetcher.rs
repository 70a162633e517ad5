//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - Refusing URLs outside the allowed domain before any request is made
//! - GET requests to fetch page content
//! - Error classification

use crate::config::{Config, UserAgentConfig};
use crate::crawler::extractor::extract_page;
use crate::crawler::page::{PageSource, PageVisit};
use crate::url::{ensure_allowed_domain, parse_http_url};
use crate::UrlError;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors from fetching a single page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl { url: String, source: UrlError },

    #[error("URL {url} is outside the allowed domain: {source}")]
    DomainNotAllowed { url: String, source: UrlError },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("HTTP {status_code} for {url}")]
    Status { url: String, status_code: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },
}

impl FetchError {
    fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            Self::Timeout { url }
        } else if error.is_connect() {
            Self::Connect { url }
        } else {
            Self::Http { url, source: error }
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Overall per-request timeout
///
/// # Example
///
/// ```no_run
/// use shelf_crawler::config::UserAgentConfig;
/// use shelf_crawler::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version
    let user_agent = format!("{}/{}", config.crawler_name, config.crawler_version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body
///
/// Redirects are followed by the client. Any non-2xx final status is an error.
pub async fn fetch_url(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))
}

/// Page source backed by HTTP, confined to one domain
pub struct HttpFetcher {
    client: Client,
    allowed_domain: String,
}

impl HttpFetcher {
    /// Creates a fetcher around an existing client
    pub fn new(client: Client, allowed_domain: impl Into<String>) -> Self {
        Self {
            client,
            allowed_domain: allowed_domain.into(),
        }
    }

    /// Builds the client and fetcher from configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.crawler.request_timeout_secs),
        )?;
        Ok(Self::new(client, config.crawler.allowed_domain.clone()))
    }

    /// Checks the URL and fetches its body
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = parse_http_url(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        ensure_allowed_domain(&parsed, &self.allowed_domain).map_err(|source| {
            FetchError::DomainNotAllowed {
                url: url.to_string(),
                source,
            }
        })?;

        fetch_url(&self.client, url).await
    }
}

impl PageSource for HttpFetcher {
    async fn visit(&self, url: &str) -> PageVisit {
        match self.fetch(url).await {
            Ok(body) => PageVisit::from_extracted(url, extract_page(&body, url)),
            Err(error) => PageVisit::failed(url, error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::page::VisitError;

    fn create_test_fetcher() -> HttpFetcher {
        let client =
            build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap();
        HttpFetcher::new(client, "example.com")
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30));
        assert!(client.is_ok());
    }

    #[test]
    fn test_fetcher_from_default_config() {
        assert!(HttpFetcher::from_config(&Config::default()).is_ok());
    }

    #[tokio::test]
    async fn test_off_domain_url_refused_without_request() {
        let fetcher = create_test_fetcher();
        let result = fetcher.fetch("https://other.com/product/1").await;
        assert!(matches!(result, Err(FetchError::DomainNotAllowed { .. })));
    }

    #[tokio::test]
    async fn test_invalid_url_refused() {
        let fetcher = create_test_fetcher();
        let result = fetcher.fetch("/relative/path").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_refused_visit_is_fetch_failure() {
        let fetcher = create_test_fetcher();
        let visit = fetcher.visit("https://other.com/").await;
        assert!(visit.links.is_empty());
        assert!(matches!(visit.outcome, Err(VisitError::Fetch { .. })));
    }

    // Responses from a live server are covered by the wiremock integration tests
}
