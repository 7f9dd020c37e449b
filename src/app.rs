//! App state and core application logic
//!
//! Owns every store, routes keyboard input to the topmost surface and
//! queues gateway requests for the worker. Responses come back through
//! [`App::apply`].

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::models::*;
use crate::store::synthesis::MAX_SLOTS;
use crate::store::{
    CatalogStore, DetailLoader, DetailRequest, FavoritesStore, PageRequest, SearchOverlay,
    SearchRequest, SearchScope, SynthesisEngine, SynthesisRequest,
};

/// Oldest year offered by the filter panel
pub const YEAR_MIN: u16 = 1990;
/// Newest year offered by the filter panel
pub const YEAR_MAX: u16 = 2025;
/// Rating slider step
pub const RATING_STEP: f32 = 0.5;

// =============================================================================
// Views and Requests
// =============================================================================

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Discover,
    Favorites,
    Lab,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Discover => "Discover",
            View::Favorites => "Favorites",
            View::Lab => "AI Lab",
        }
    }
}

/// Work queued for the background worker
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Page(PageRequest),
    Genres(MediaType),
    Details(DetailRequest),
    Search(SearchRequest),
    Synthesis(SynthesisRequest),
    OpenUrl(String),
}

/// Outcome of a [`Request`], routed back to its store
#[derive(Debug)]
pub enum Response {
    Page(PageRequest, Result<Vec<CatalogItem>>),
    Genres(MediaType, Result<Vec<Genre>>),
    Details(DetailRequest, Result<DetailRecord>),
    Search(SearchRequest, Result<Vec<CatalogItem>>),
    Synthesis(SynthesisRequest, Result<Vec<CatalogItem>>),
    Opened(String, Result<()>),
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            len,
        }
    }

    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Update length, clamping the selection
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Shared list navigation keys; true if handled
    fn handle_nav(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.up(),
            KeyCode::Down | KeyCode::Char('j') => self.down(),
            KeyCode::PageUp => self.page_up(10),
            KeyCode::PageDown => self.page_down(10),
            KeyCode::Home => self.first(),
            KeyCode::End => self.last(),
            _ => return false,
        }
        true
    }
}

// =============================================================================
// Overlay State
// =============================================================================

/// Field highlighted in the filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Genre,
    Year,
    Rating,
    Sort,
    Actor,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Genre,
        FilterField::Year,
        FilterField::Rating,
        FilterField::Sort,
        FilterField::Actor,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterPanel {
    pub open: bool,
    pub field: FilterField,
}

/// Which part of the detail view has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailFocus {
    #[default]
    Info,
    Cast,
    Similar,
}

impl DetailFocus {
    fn next(self) -> Self {
        match self {
            DetailFocus::Info => DetailFocus::Cast,
            DetailFocus::Cast => DetailFocus::Similar,
            DetailFocus::Similar => DetailFocus::Info,
        }
    }
}

/// Which list in the lab has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabFocus {
    #[default]
    Slots,
    Results,
}

// =============================================================================
// Main Application State
// =============================================================================

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub view: View,

    pub catalog: CatalogStore,
    pub details: DetailLoader,
    pub favorites: FavoritesStore,
    pub synthesis: SynthesisEngine,
    pub search: SearchOverlay,
    pub seed_picker: SearchOverlay,

    pub filter_panel: FilterPanel,
    pub detail_focus: DetailFocus,
    pub detail_cursor: usize,
    pub lab_focus: LabFocus,

    pub discover_list: ListState,
    pub favorites_list: ListState,
    pub slots_list: ListState,
    pub results_list: ListState,

    /// One-line message for the status bar
    pub status: Option<String>,

    pending: Vec<Request>,
}

impl App {
    pub fn new(favorites: FavoritesStore, synthesis: SynthesisEngine) -> Self {
        let media_type = MediaType::Movie;
        Self {
            running: true,
            view: View::Discover,
            catalog: CatalogStore::new(media_type),
            details: DetailLoader::new(),
            favorites,
            synthesis,
            search: SearchOverlay::global(media_type),
            seed_picker: SearchOverlay::seed_picker(),
            filter_panel: FilterPanel::default(),
            detail_focus: DetailFocus::Info,
            detail_cursor: 0,
            lab_focus: LabFocus::Slots,
            discover_list: ListState::default(),
            favorites_list: ListState::default(),
            slots_list: ListState::default(),
            results_list: ListState::default(),
            status: None,
            pending: Vec::new(),
        }
    }

    /// Queue the initial catalog page and genre list
    pub fn start(&mut self) {
        let request = self.catalog.begin_first_page();
        self.pending.push(Request::Page(request));
        self.pending.push(Request::Genres(self.catalog.media_type()));
        self.sync_lists();
    }

    /// Drain requests queued since the last call
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.pending)
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    // -------------------------------------------------------------------------
    // Selection helpers
    // -------------------------------------------------------------------------

    pub fn selected_catalog_item(&self) -> Option<&CatalogItem> {
        self.catalog.items().get(self.discover_list.selected)
    }

    pub fn selected_favorite(&self) -> Option<&CatalogItem> {
        self.favorites.items().get(self.favorites_list.selected)
    }

    pub fn selected_result(&self) -> Option<&CatalogItem> {
        self.synthesis.results().get(self.results_list.selected)
    }

    fn sync_lists(&mut self) {
        self.discover_list.set_len(self.catalog.items().len());
        self.favorites_list.set_len(self.favorites.len());
        self.slots_list.set_len(self.synthesis.slots().len());
        self.results_list.set_len(self.synthesis.results().len());
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Request details for an item, using the item's own media type
    pub fn open_details(&mut self, item: &CatalogItem) {
        let request = self.details.open_details(item.media_type, item.id);
        self.pending.push(Request::Details(request));
    }

    pub fn close_details(&mut self) {
        self.details.close_details();
        self.detail_focus = DetailFocus::Info;
        self.detail_cursor = 0;
    }

    pub fn switch_view(&mut self, view: View) {
        self.view = view;
        self.filter_panel.open = false;
    }

    pub fn toggle_media_type(&mut self) {
        let media_type = self.catalog.media_type().toggled();
        if let Some(request) = self.catalog.set_media_type(media_type) {
            self.pending.push(Request::Page(request));
            self.pending.push(Request::Genres(media_type));
            self.discover_list.reset();
        }
        self.search.set_media_type(media_type);
    }

    fn push_page(&mut self, request: Option<PageRequest>) {
        if let Some(request) = request {
            self.discover_list.reset();
            self.pending.push(Request::Page(request));
        }
    }

    /// Toggle the open detail record in favorites
    pub fn toggle_favorite(&mut self, item: &CatalogItem) {
        match self.favorites.toggle_favorite(item) {
            Ok(true) => self.set_status(format!("Added \"{}\" to favorites", item.title)),
            Ok(false) => self.set_status(format!("Removed \"{}\" from favorites", item.title)),
            Err(e) => self.set_status(format!("Could not save favorites: {}", e)),
        }
    }

    pub fn add_to_synthesis(&mut self, item: &CatalogItem) {
        if self.synthesis.add_slot(item) {
            self.set_status(format!("\"{}\" added to the lab", item.title));
        } else if self.synthesis.is_full() {
            self.set_status(format!("All {} lab slots are taken", MAX_SLOTS));
        } else {
            self.set_status(format!("\"{}\" is already in the lab", item.title));
        }
    }

    pub fn run_synthesis(&mut self) {
        match self.synthesis.begin_run() {
            Some(request) => {
                self.set_status("Scanning...");
                self.pending.push(Request::Synthesis(request));
            }
            None if self.synthesis.is_scanning() => {}
            None => self.set_status(format!("Pick {} titles to run the lab", MAX_SLOTS)),
        }
    }

    pub fn filter_by_actor(&mut self, cast: &CastMember) {
        let request = self.catalog.filter_by_actor(cast.id, cast.name.clone());
        self.push_page(request);
        self.close_details();
        self.switch_view(View::Discover);
        self.set_status(format!("Showing titles with {}", cast.name));
    }

    fn adjust_filter(&mut self, delta: i32) {
        let filter = self.catalog.filter().clone();
        let patch = match self.filter_panel.field {
            FilterField::Genre => {
                let ids: Vec<Option<u32>> = std::iter::once(None)
                    .chain(self.catalog.genres().iter().map(|g| Some(g.id)))
                    .collect();
                let current = ids.iter().position(|g| *g == filter.genre).unwrap_or(0) as i32;
                let next = (current + delta).rem_euclid(ids.len() as i32) as usize;
                FilterPatch::genre(ids[next])
            }
            FilterField::Year => FilterPatch::year(step_year(filter.year, delta)),
            FilterField::Rating => {
                FilterPatch::min_rating(filter.min_rating + RATING_STEP * delta as f32)
            }
            FilterField::Sort => FilterPatch::sort(match filter.sort {
                SortKey::PopularityDesc => SortKey::RatingDesc,
                SortKey::RatingDesc => SortKey::PopularityDesc,
            }),
            FilterField::Actor => FilterPatch {
                actor: Some(None),
                ..FilterPatch::default()
            },
        };
        let request = self.catalog.set_filter(patch);
        self.push_page(request);
    }

    // -------------------------------------------------------------------------
    // Responses
    // -------------------------------------------------------------------------

    /// Route a worker response to the store that issued it
    pub fn apply(&mut self, response: Response) {
        match response {
            Response::Page(request, result) => {
                self.catalog.finish_page(&request, result);
            }
            Response::Genres(media_type, result) => {
                self.catalog.finish_genres(media_type, result);
            }
            Response::Details(request, result) => {
                let current = self.details.is_current(&request);
                if self.details.finish(&request, result) {
                    self.detail_focus = DetailFocus::Info;
                    self.detail_cursor = 0;
                } else if current {
                    self.set_status("Could not load details");
                }
            }
            Response::Search(request, result) => match request.scope {
                SearchScope::Catalog => {
                    self.search.finish_search(&request, result);
                }
                SearchScope::Seeds => {
                    self.seed_picker.finish_search(&request, result);
                }
            },
            Response::Synthesis(request, result) => {
                if self.synthesis.finish_run(&request, result) {
                    self.results_list.reset();
                    self.lab_focus = LabFocus::Results;
                    self.set_status(format!(
                        "Synthesis found {} titles",
                        self.synthesis.results().len()
                    ));
                } else if !self.synthesis.is_scanning() {
                    self.set_status("Synthesis failed");
                }
            }
            Response::Opened(url, result) => {
                if let Err(e) = result {
                    debug!(url = %url, error = %e, "opener failed");
                    self.set_status(format!("Could not open {}", url));
                }
            }
        }
        self.sync_lists();
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }
        self.status = None;

        let handled = if self.seed_picker.is_open() {
            self.handle_overlay_key(SearchScope::Seeds, key)
        } else if self.search.is_open() {
            self.handle_overlay_key(SearchScope::Catalog, key)
        } else if self.details.is_open() {
            self.handle_detail_key(key)
        } else if self.filter_panel.open && self.handle_filter_key(key) {
            true
        } else {
            self.handle_global_key(key) || self.handle_view_key(key)
        };

        self.sync_lists();
        handled
    }

    fn handle_overlay_key(&mut self, scope: SearchScope, key: KeyEvent) -> bool {
        let overlay = match scope {
            SearchScope::Catalog => &mut self.search,
            SearchScope::Seeds => &mut self.seed_picker,
        };
        let request = match key.code {
            KeyCode::Esc => {
                overlay.close();
                None
            }
            KeyCode::Up => {
                overlay.select_prev();
                None
            }
            KeyCode::Down => {
                overlay.select_next();
                None
            }
            KeyCode::Backspace => overlay.backspace(),
            KeyCode::Char(c) => overlay.input(c),
            KeyCode::Enter => {
                let selected = overlay.selected;
                if let Some(item) = overlay.pick(selected) {
                    match scope {
                        SearchScope::Catalog => self.open_details(&item),
                        SearchScope::Seeds => self.add_to_synthesis(&item),
                    }
                }
                None
            }
            _ => return false,
        };
        if let Some(request) = request {
            self.pending.push(Request::Search(request));
        }
        true
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.close_details();
                return true;
            }
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            _ => {}
        }

        let Some(record) = self.details.current().cloned() else {
            return false;
        };

        match key.code {
            KeyCode::Char('t') => match record.trailer() {
                Some(video) => self.pending.push(Request::OpenUrl(video.url())),
                None => self.set_status("No trailer available"),
            },
            KeyCode::Char(' ') => self.toggle_favorite(&record.to_item()),
            KeyCode::Char('a') => {
                self.add_to_synthesis(&record.to_item());
                self.close_details();
                self.switch_view(View::Lab);
            }
            KeyCode::Char('s') => self.set_status(record.share_text()),
            KeyCode::Tab => {
                self.detail_focus = self.detail_focus.next();
                self.detail_cursor = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail_cursor = self.detail_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = match self.detail_focus {
                    DetailFocus::Info => 0,
                    DetailFocus::Cast => record.cast.len(),
                    DetailFocus::Similar => record.similar.len(),
                };
                if self.detail_cursor + 1 < len {
                    self.detail_cursor += 1;
                }
            }
            KeyCode::Enter => match self.detail_focus {
                DetailFocus::Info => {}
                DetailFocus::Cast => {
                    if let Some(cast) = record.cast.get(self.detail_cursor) {
                        self.filter_by_actor(cast);
                    }
                }
                DetailFocus::Similar => {
                    if let Some(item) = record.similar.get(self.detail_cursor) {
                        self.open_details(item);
                    }
                }
            },
            _ => return false,
        }
        true
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('f') => self.filter_panel.open = false,
            KeyCode::Up => self.filter_panel.field = self.filter_panel.field.prev(),
            KeyCode::Down => self.filter_panel.field = self.filter_panel.field.next(),
            KeyCode::Left => self.adjust_filter(-1),
            KeyCode::Right => self.adjust_filter(1),
            KeyCode::Char('x') => {
                let request = self.catalog.clear_actor_filter();
                self.push_page(request);
            }
            _ => return false,
        }
        true
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('1') => self.switch_view(View::Discover),
            KeyCode::Char('2') => self.switch_view(View::Favorites),
            KeyCode::Char('3') => self.switch_view(View::Lab),
            KeyCode::Char('/') => self.search.open(),
            KeyCode::Char('m') => self.toggle_media_type(),
            KeyCode::Char('f') => {
                self.switch_view(View::Discover);
                self.filter_panel.open = true;
            }
            _ => return false,
        }
        true
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> bool {
        match self.view {
            View::Discover => self.handle_discover_key(key),
            View::Favorites => self.handle_favorites_key(key),
            View::Lab => self.handle_lab_key(key),
        }
    }

    fn handle_discover_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                if let Some(item) = self.selected_catalog_item().cloned() {
                    self.open_details(&item);
                }
                true
            }
            KeyCode::Char('n') => {
                if let Some(request) = self.catalog.begin_next_page() {
                    self.pending.push(Request::Page(request));
                }
                true
            }
            code => self.discover_list.handle_nav(code),
        }
    }

    fn handle_favorites_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                if let Some(item) = self.selected_favorite().cloned() {
                    self.open_details(&item);
                }
                true
            }
            KeyCode::Char(' ') => {
                if let Some(item) = self.selected_favorite().cloned() {
                    self.toggle_favorite(&item);
                }
                true
            }
            code => self.favorites_list.handle_nav(code),
        }
    }

    fn handle_lab_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('+') => {
                self.seed_picker.open();
                true
            }
            KeyCode::Char('r') => {
                self.run_synthesis();
                true
            }
            KeyCode::Char('d') => {
                if let Some(removed) = self.synthesis.remove_slot(self.slots_list.selected) {
                    self.set_status(format!("Removed \"{}\" from the lab", removed.title));
                }
                true
            }
            KeyCode::Tab => {
                self.lab_focus = match self.lab_focus {
                    LabFocus::Slots => LabFocus::Results,
                    LabFocus::Results => LabFocus::Slots,
                };
                true
            }
            KeyCode::Enter if self.lab_focus == LabFocus::Results => {
                if let Some(item) = self.selected_result().cloned() {
                    self.open_details(&item);
                }
                true
            }
            code => match self.lab_focus {
                LabFocus::Slots => self.slots_list.handle_nav(code),
                LabFocus::Results => self.results_list.handle_nav(code),
            },
        }
    }
}

/// Step the year slider; `None` ("all years") sits just above [`YEAR_MAX`]
fn step_year(year: Option<u16>, delta: i32) -> Option<u16> {
    let current = year.map(i32::from).unwrap_or(YEAR_MAX as i32 + 1);
    let next = (current + delta).clamp(YEAR_MIN as i32, YEAR_MAX as i32 + 1);
    (next <= YEAR_MAX as i32).then_some(next as u16)
}

// =============================================================================
// Unit Tests
// =============================================================================
