//! Search overlays
//!
//! Two independent instances exist: the global search (scoped to the
//! catalog's media type, picking opens details) and the seed picker
//! (movies only, picking fills a synthesis slot). Every keystroke past two
//! characters issues a request tagged with a sequence number; only the
//! response to the latest one is shown.

use anyhow::Result;
use tracing::{debug, warn};

use crate::api::Gateway;
use crate::models::{CatalogItem, MediaType};

/// Queries this short (in chars) never hit the gateway
pub const MIN_QUERY_CHARS: usize = 2;

/// Which overlay a request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    Catalog,
    Seeds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    Open,
    Querying,
    ResultsShown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub scope: SearchScope,
    pub seq: u64,
    pub media_type: MediaType,
    pub query: String,
}

impl SearchRequest {
    pub async fn execute(&self, gateway: &dyn Gateway) -> Result<Vec<CatalogItem>> {
        gateway.search(self.media_type, &self.query).await
    }
}

#[derive(Debug, Clone)]
pub struct SearchOverlay {
    scope: SearchScope,
    media_type: MediaType,
    open: bool,
    query: String,
    results: Vec<CatalogItem>,
    seq: u64,
    in_flight: bool,
    /// Highlighted result
    pub selected: usize,
}

impl SearchOverlay {
    fn new(scope: SearchScope, media_type: MediaType) -> Self {
        Self {
            scope,
            media_type,
            open: false,
            query: String::new(),
            results: Vec::new(),
            seq: 0,
            in_flight: false,
            selected: 0,
        }
    }

    /// Global search over the catalog's media type
    pub fn global(media_type: MediaType) -> Self {
        Self::new(SearchScope::Catalog, media_type)
    }

    /// Seed picker for the synthesis lab
    pub fn seed_picker() -> Self {
        Self::new(SearchScope::Seeds, MediaType::Movie)
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[CatalogItem] {
        &self.results
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> OverlayState {
        if !self.open {
            OverlayState::Closed
        } else if self.query.chars().count() <= MIN_QUERY_CHARS {
            OverlayState::Open
        } else if self.in_flight {
            OverlayState::Querying
        } else {
            OverlayState::ResultsShown
        }
    }

    /// Follow the catalog's media type (global search only)
    pub fn set_media_type(&mut self, media_type: MediaType) {
        if self.scope == SearchScope::Catalog {
            self.media_type = media_type;
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.reset();
    }

    fn reset(&mut self) {
        self.query.clear();
        self.results.clear();
        self.selected = 0;
        self.in_flight = false;
        // Anything still in flight belongs to a query that no longer exists
        self.seq += 1;
    }

    pub fn input(&mut self, c: char) -> Option<SearchRequest> {
        let mut text = self.query.clone();
        text.push(c);
        self.set_query(text)
    }

    pub fn backspace(&mut self) -> Option<SearchRequest> {
        let mut text = self.query.clone();
        text.pop();
        self.set_query(text)
    }

    /// Replace the query text; returns the request to issue, if any
    pub fn set_query(&mut self, text: impl Into<String>) -> Option<SearchRequest> {
        self.query = text.into();
        self.seq += 1;
        self.selected = 0;

        if self.query.chars().count() <= MIN_QUERY_CHARS {
            self.results.clear();
            self.in_flight = false;
            return None;
        }

        self.in_flight = true;
        Some(SearchRequest {
            scope: self.scope,
            seq: self.seq,
            media_type: self.media_type,
            query: self.query.clone(),
        })
    }

    /// Apply a response; returns true if it was the latest request's
    pub fn finish_search(&mut self, request: &SearchRequest, result: Result<Vec<CatalogItem>>) -> bool {
        if request.seq != self.seq {
            debug!(query = %request.query, "dropping stale search response");
            return false;
        }
        self.in_flight = false;
        match result {
            Ok(results) => {
                self.results = results;
                self.selected = 0;
                true
            }
            Err(e) => {
                warn!(query = %request.query, error = %e, "search failed");
                false
            }
        }
    }

    /// Take a result and close the overlay
    pub fn pick(&mut self, index: usize) -> Option<CatalogItem> {
        let item = self.results.get(index).cloned()?;
        self.close();
        Some(item)
    }

    pub fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1).min(self.results.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub async fn search(&mut self, text: &str, gateway: &dyn Gateway) -> bool {
        match self.set_query(text) {
            Some(request) => {
                let result = request.execute(gateway).await;
                self.finish_search(&request, result)
            }
            None => false,
        }
    }
}
