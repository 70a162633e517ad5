//! The contract between the frontier and whatever fetches pages
//!
//! A [`PageSource`] turns a URL into a [`PageVisit`]: the candidate links found
//! on the page and either a product record or the reason there is none.

use crate::crawler::extractor::{ExtractedPage, ProductRecord};
use crate::crawler::fetcher::FetchError;
use thiserror::Error;

/// Why a visited page produced no record
#[derive(Debug, Error)]
pub enum VisitError {
    #[error("Error on visiting {url}: {source}")]
    Fetch { url: String, source: FetchError },

    #[error("Not a product page: {url}")]
    NotProduct { url: String },
}

impl VisitError {
    /// Returns true if the page could not be fetched at all
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

/// Outcome of visiting a single URL
#[derive(Debug)]
pub struct PageVisit {
    /// The URL that was visited
    pub url: String,

    /// Candidate links found on the page, unfiltered
    ///
    /// Populated for non-product pages too; empty only when nothing was fetched.
    pub links: Vec<String>,

    /// The extracted record, or why there is none
    pub outcome: Result<ProductRecord, VisitError>,
}

impl PageVisit {
    /// Builds a visit from an extracted document
    pub fn from_extracted(url: &str, page: ExtractedPage) -> Self {
        let outcome = page.record.ok_or_else(|| VisitError::NotProduct {
            url: url.to_string(),
        });

        Self {
            url: url.to_string(),
            links: page.links,
            outcome,
        }
    }

    /// Builds a visit for a page that could not be fetched
    pub fn failed(url: &str, error: FetchError) -> Self {
        Self {
            url: url.to_string(),
            links: Vec::new(),
            outcome: Err(VisitError::Fetch {
                url: url.to_string(),
                source: error,
            }),
        }
    }
}

/// Fetches a page and runs extraction over it
///
/// The frontier awaits one visit at a time, so implementations need not be
/// safe for concurrent use.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Visits `url`, returning its links and extraction outcome
    async fn visit(&self, url: &str) -> PageVisit;
}

/// In-memory page source keyed by URL, for tests
#[cfg(test)]
pub(crate) struct StaticSite {
    pages: std::collections::HashMap<String, String>,
    visits: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl StaticSite {
    pub(crate) fn new() -> Self {
        Self {
            pages: std::collections::HashMap::new(),
            visits: std::cell::RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// URLs visited so far, in order
    pub(crate) fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

#[cfg(test)]
impl PageSource for StaticSite {
    async fn visit(&self, url: &str) -> PageVisit {
        self.visits.borrow_mut().push(url.to_string());
        match self.pages.get(url) {
            Some(html) => {
                PageVisit::from_extracted(url, crate::crawler::extract_page(html, url))
            }
            None => PageVisit::failed(
                url,
                FetchError::Status {
                    url: url.to_string(),
                    status_code: 404,
                },
            ),
        }
    }
}
