//! Crawl frontier: known URLs, their visited status, and the traversal loop
//!
//! The frontier owns:
//! - the URL → visited map (entries are never removed, flags only go false → true)
//! - the count of URLs that transitioned to visited
//! - the admission filter for discovered links
//! - the batch loop that drives a crawl until exhaustion or the ceiling

use crate::config::CeilingMode;
use crate::crawler::extractor::ProductRecord;
use crate::crawler::page::PageSource;
use crate::url::{LinkClassification, LinkFilter};
use std::collections::{HashMap, VecDeque};

/// Set of known URLs plus the traversal policy over them
pub struct Frontier {
    /// URL → visited flag
    status: HashMap<String, bool>,

    /// Seeded URLs in discovery order; the next batch is drained from here
    queue: VecDeque<String>,

    /// Number of false → true transitions made by `mark_visited`
    visited_count: usize,

    filter: LinkFilter,
}

impl Frontier {
    /// Creates an empty frontier with the given admission filter
    pub fn new(filter: LinkFilter) -> Self {
        Self {
            status: HashMap::new(),
            queue: VecDeque::new(),
            visited_count: 0,
            filter,
        }
    }

    /// Registers a URL as known and unvisited
    ///
    /// No-op if the URL is already known, whatever its visited state.
    pub fn seed(&mut self, url: &str) {
        if self.status.contains_key(url) {
            return;
        }
        self.status.insert(url.to_string(), false);
        self.queue.push_back(url.to_string());
    }

    /// Returns true if at least one known URL is unvisited
    pub fn has_unvisited(&self) -> bool {
        self.status.values().any(|visited| !visited)
    }

    /// Marks a URL as visited
    ///
    /// An unknown URL is registered as visited without counting it; an
    /// already-visited URL is left alone. Only an unvisited → visited
    /// transition increments the visited count.
    pub fn mark_visited(&mut self, url: &str) {
        match self.status.get_mut(url) {
            None => {
                self.status.insert(url.to_string(), true);
            }
            Some(true) => {}
            Some(visited) => {
                *visited = true;
                self.visited_count += 1;
            }
        }
    }

    /// Returns true if the URL is known and visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.status.get(url).copied().unwrap_or(false)
    }

    /// Returns true if the URL has been seeded or marked
    pub fn contains(&self, url: &str) -> bool {
        self.status.contains_key(url)
    }

    /// Number of URLs that transitioned to visited
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Number of known URLs
    pub fn len(&self) -> usize {
        self.status.len()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// Known URLs that have not been visited, in no particular order
    pub fn unvisited(&self) -> Vec<String> {
        self.status
            .iter()
            .filter(|(_, visited)| !**visited)
            .map(|(url, _)| url.clone())
            .collect()
    }

    /// Classifies a discovered link and seeds it if admitted
    pub fn admit(&mut self, link: &str) -> LinkClassification {
        let classification = self.filter.classify(link);
        if classification.should_follow() {
            self.seed(link);
        }
        classification
    }

    /// Returns true if the crawl must stop before the next page or batch
    fn ceiling_reached(&self, ceiling: u32, mode: CeilingMode) -> bool {
        let ceiling = ceiling as usize;
        match mode {
            CeilingMode::Batch => self.visited_count > ceiling,
            CeilingMode::Exact => self.visited_count >= ceiling,
        }
    }

    /// Drains the queue into the next batch, skipping URLs already visited
    fn take_batch(&mut self) -> Vec<String> {
        let batch: Vec<String> = self.queue.drain(..).collect();
        batch
            .into_iter()
            .filter(|url| !self.is_visited(url))
            .collect()
    }

    /// Drives the crawl until no unvisited URL remains or the ceiling is hit
    ///
    /// The stop condition is evaluated before each batch. A batch is the set
    /// of unvisited URLs known when it starts; links discovered while it runs
    /// are seeded and form the next batch. In [`CeilingMode::Batch`] a batch
    /// always runs to completion, so the number of visited pages can exceed
    /// `ceiling`. [`CeilingMode::Exact`] also checks before every page.
    ///
    /// Every visited URL is marked visited whether or not it produced a
    /// record. Records are handed to `on_record` as they are extracted and
    /// returned together at the end.
    ///
    /// # Arguments
    ///
    /// * `ceiling` - Maximum visited-page count
    /// * `mode` - How strictly the ceiling is applied
    /// * `source` - Fetches and extracts a page
    /// * `on_record` - Called once for each extracted record
    pub async fn run<S, F>(
        &mut self,
        ceiling: u32,
        mode: CeilingMode,
        source: &S,
        mut on_record: F,
    ) -> Vec<ProductRecord>
    where
        S: PageSource,
        F: FnMut(&ProductRecord),
    {
        let mut records = Vec::new();
        let mut batch_number = 0;

        while self.has_unvisited() && !self.ceiling_reached(ceiling, mode) {
            batch_number += 1;
            let mut batch = self.take_batch().into_iter();
            tracing::debug!(
                "Starting batch {} with {} URLs ({} visited so far)",
                batch_number,
                batch.len(),
                self.visited_count
            );

            while let Some(url) = batch.next() {
                if mode == CeilingMode::Exact && self.ceiling_reached(ceiling, mode) {
                    // Put the rest back so the frontier still reports them as pending
                    self.queue.push_front(url);
                    self.queue.extend(batch);
                    break;
                }

                if self.is_visited(&url) {
                    continue;
                }

                tracing::debug!("Visiting {}", url);
                let visit = source.visit(&url).await;

                let mut admitted = 0;
                for link in &visit.links {
                    if self.admit(link).should_follow() {
                        admitted += 1;
                    }
                }
                tracing::trace!(
                    "{}: {} links found, {} admitted",
                    url,
                    visit.links.len(),
                    admitted
                );

                match visit.outcome {
                    Ok(record) => {
                        tracing::debug!("Extracted product {} from {}", record.sku, url);
                        on_record(&record);
                        records.push(record);
                    }
                    Err(e) if e.is_fetch_failure() => {
                        tracing::warn!("{}", e);
                    }
                    Err(e) => {
                        tracing::debug!("{}", e);
                    }
                }

                self.mark_visited(&url);
            }
        }

        if self.has_unvisited() {
            tracing::info!(
                "Page ceiling of {} reached after {} visited pages; {} URLs left unvisited",
                ceiling,
                self.visited_count,
                self.unvisited().len()
            );
        } else {
            tracing::info!("There are no unvisited links left");
        }

        records
    }
}
