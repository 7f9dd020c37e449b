//! Catalog store
//!
//! Holds the browsable list, the filter/sort configuration and the page
//! counter. Unfiltered catalogs are backed by trending, filtered ones by
//! discovery.

use anyhow::Result;
use tracing::{debug, warn};

use crate::api::Gateway;
use crate::models::{ActorFilter, CatalogItem, FilterPatch, FilterState, Genre, MediaType};

/// One page fetch issued by the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// Load generation this request belongs to
    pub generation: u64,
    pub media_type: MediaType,
    /// `None` means trending
    pub filter: Option<FilterState>,
    pub page: u32,
    /// Append to (rather than replace) the current items
    pub append: bool,
}

impl PageRequest {
    /// Run the request against a gateway
    pub async fn execute(&self, gateway: &dyn Gateway) -> Result<Vec<CatalogItem>> {
        match &self.filter {
            Some(filter) => gateway.discover(self.media_type, filter, self.page).await,
            None => gateway.trending(self.media_type, self.page).await,
        }
    }
}

/// Browsable catalog state
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    media_type: MediaType,
    filter: FilterState,
    items: Vec<CatalogItem>,
    page: u32,
    genres: Vec<Genre>,
    loading: bool,
    loading_more: bool,
    generation: u64,
}

impl CatalogStore {
    pub fn new(media_type: MediaType) -> Self {
        Self {
            media_type,
            page: 1,
            ..Self::default()
        }
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Name of a genre id in the current genre list
    pub fn genre_name(&self, id: u32) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.as_str())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// True when the "no data" placeholder should be shown
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_active_filter(&self) -> bool {
        self.filter.is_active()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Switch media type; returns the reload to issue if it changed
    pub fn set_media_type(&mut self, media_type: MediaType) -> Option<PageRequest> {
        if self.media_type == media_type {
            return None;
        }
        self.media_type = media_type;
        self.genres.clear();
        Some(self.begin_first_page())
    }

    /// Update filter fields; returns the reload to issue if anything changed
    pub fn set_filter(&mut self, patch: FilterPatch) -> Option<PageRequest> {
        if patch.apply(&mut self.filter) {
            Some(self.begin_first_page())
        } else {
            None
        }
    }

    /// Scope discovery to a cast member, dropping genre and year
    pub fn filter_by_actor(&mut self, id: u64, name: impl Into<String>) -> Option<PageRequest> {
        self.set_filter(FilterPatch {
            genre: Some(None),
            year: Some(None),
            actor: Some(Some(ActorFilter {
                id,
                name: name.into(),
            })),
            ..FilterPatch::default()
        })
    }

    pub fn clear_actor_filter(&mut self) -> Option<PageRequest> {
        self.set_filter(FilterPatch {
            actor: Some(None),
            ..FilterPatch::default()
        })
    }

    /// Start a reload from page 1; supersedes anything in flight
    pub fn begin_first_page(&mut self) -> PageRequest {
        self.generation += 1;
        self.page = 1;
        self.loading = true;
        self.loading_more = false;
        self.request(1, false)
    }

    /// Start loading the next page, unless any page load is in flight
    ///
    /// Refused during a first-page reload: the items still belong to the
    /// previous filter, so appending would mix the two.
    pub fn begin_next_page(&mut self) -> Option<PageRequest> {
        if self.loading || self.loading_more {
            return None;
        }
        self.loading_more = true;
        Some(self.request(self.page + 1, true))
    }

    fn request(&self, page: u32, append: bool) -> PageRequest {
        PageRequest {
            generation: self.generation,
            media_type: self.media_type,
            filter: self.filter.is_active().then(|| self.filter.clone()),
            page,
            append,
        }
    }

    /// Apply a page response; returns true if it changed the items
    pub fn finish_page(&mut self, request: &PageRequest, result: Result<Vec<CatalogItem>>) -> bool {
        if request.generation != self.generation {
            debug!(
                generation = request.generation,
                current = self.generation,
                "dropping stale page response"
            );
            return false;
        }

        if request.append {
            self.loading_more = false;
        } else {
            self.loading = false;
        }

        match result {
            Ok(items) if request.append => {
                self.items.extend(items);
                self.page = request.page;
                true
            }
            Ok(items) => {
                self.items = items;
                self.page = request.page;
                true
            }
            Err(e) => {
                warn!(page = request.page, error = %e, "catalog page load failed");
                false
            }
        }
    }

    /// Apply a genre list response for `media_type`
    pub fn finish_genres(&mut self, media_type: MediaType, result: Result<Vec<Genre>>) {
        if media_type != self.media_type {
            return;
        }
        match result {
            Ok(genres) => self.genres = genres,
            Err(e) => warn!(error = %e, "genre list load failed"),
        }
    }

    // -------------------------------------------------------------------------
    // Awaiting helpers
    // -------------------------------------------------------------------------

    /// Run a previously issued request and apply it
    pub async fn fetch(&mut self, request: PageRequest, gateway: &dyn Gateway) -> bool {
        let result = request.execute(gateway).await;
        self.finish_page(&request, result)
    }

    pub async fn load_first_page(&mut self, gateway: &dyn Gateway) -> bool {
        let request = self.begin_first_page();
        self.fetch(request, gateway).await
    }

    pub async fn load_next_page(&mut self, gateway: &dyn Gateway) -> bool {
        match self.begin_next_page() {
            Some(request) => self.fetch(request, gateway).await,
            None => false,
        }
    }

    pub async fn load_genres(&mut self, gateway: &dyn Gateway) {
        let media_type = self.media_type;
        let result = gateway.genres(media_type).await;
        self.finish_genres(media_type, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortKey;

    fn item(id: u64) -> CatalogItem {
        CatalogItem {
            id,
            title: format!("Item {}", id),
            poster_path: None,
            release_date: None,
            vote_average: 5.0,
            media_type: MediaType::Movie,
        }
    }

    #[test]
    fn test_unfiltered_requests_trending() {
        let mut store = CatalogStore::new(MediaType::Movie);
        let request = store.begin_first_page();
        assert!(request.filter.is_none());
        assert_eq!(request.page, 1);
        assert!(!request.append);
    }

    #[test]
    fn test_sort_change_requests_discovery() {
        let mut store = CatalogStore::new(MediaType::Tv);
        let request = store.set_filter(FilterPatch::sort(SortKey::RatingDesc)).unwrap();
        assert_eq!(request.media_type, MediaType::Tv);
        assert_eq!(request.filter.unwrap().sort, SortKey::RatingDesc);
    }

    #[test]
    fn test_unchanged_filter_issues_nothing() {
        let mut store = CatalogStore::new(MediaType::Movie);
        assert!(store.set_filter(FilterPatch::year(None)).is_none());
        assert!(store.set_media_type(MediaType::Movie).is_none());
    }

    #[test]
    fn test_next_page_refused_while_in_flight() {
        let mut store = CatalogStore::new(MediaType::Movie);
        let first = store.begin_next_page().unwrap();
        assert_eq!(first.page, 2);
        assert!(store.begin_next_page().is_none());

        assert!(store.finish_page(&first, Ok(vec![item(1)])));
        assert_eq!(store.page(), 2);
        assert!(store.begin_next_page().is_some());
    }

    #[test]
    fn test_next_page_refused_during_reload() {
        let mut store = CatalogStore::new(MediaType::Movie);
        let first = store.begin_first_page();
        store.finish_page(&first, Ok(vec![item(1), item(2)]));

        let reload = store.set_filter(FilterPatch::genre(Some(28))).unwrap();
        assert!(store.begin_next_page().is_none());

        // Reload fails: the old list stays intact and is not extended
        assert!(!store.finish_page(&reload, Err(anyhow::anyhow!("offline"))));
        let ids: Vec<u64> = store.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(!store.is_loading());
        assert!(store.begin_next_page().is_some());
    }

    #[test]
    fn test_failed_next_page_keeps_page() {
        let mut store = CatalogStore::new(MediaType::Movie);
        let request = store.begin_next_page().unwrap();
        assert!(!store.finish_page(&request, Err(anyhow::anyhow!("offline"))));
        assert_eq!(store.page(), 1);
        assert!(!store.is_loading_more());
    }

    #[test]
    fn test_stale_generation_dropped() {
        let mut store = CatalogStore::new(MediaType::Movie);
        let old = store.begin_next_page().unwrap();
        let fresh = store.set_filter(FilterPatch::genre(Some(28))).unwrap();

        assert!(!store.finish_page(&old, Ok(vec![item(1)])));
        assert!(store.is_empty());

        assert!(store.finish_page(&fresh, Ok(vec![item(2)])));
        assert_eq!(store.items()[0].id, 2);
    }

    #[test]
    fn test_actor_filter_clears_genre_and_year() {
        let mut store = CatalogStore::new(MediaType::Movie);
        store.set_filter(FilterPatch::genre(Some(28)));
        store.set_filter(FilterPatch::year(Some(2001)));

        let request = store.filter_by_actor(287, "Brad Pitt").unwrap();
        let filter = request.filter.unwrap();
        assert_eq!(filter.genre, None);
        assert_eq!(filter.year, None);
        assert_eq!(filter.actor.unwrap().id, 287);

        // Only the actor was active, so clearing it falls back to trending
        let request = store.clear_actor_filter().unwrap();
        assert!(request.filter.is_none());
    }

    #[test]
    fn test_genres_for_old_media_type_ignored() {
        let mut store = CatalogStore::new(MediaType::Movie);
        store.set_media_type(MediaType::Tv);
        store.finish_genres(
            MediaType::Movie,
            Ok(vec![Genre {
                id: 28,
                name: "Action".into(),
            }]),
        );
        assert!(store.genres().is_empty());
    }
}
