//! Fluxify - terminal movie and TV discovery
//!
//! Browse trending and filtered catalogs from TMDB, open rich details,
//! keep a local favorites list and blend three seed movies into a fresh
//! set of recommendations.
//!
//! # Modules
//!
//! - `models` - Catalog items, detail records, filters
//! - `api` - Gateway trait and the TMDB client
//! - `store` - Catalog, detail, favorites, search and synthesis stores
//! - `app` - TUI state, key handling and request routing
//! - `worker` - Background execution of queued requests
//! - `ui` - ratatui rendering
//! - `cli` / `commands` - Non-interactive subcommands

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod launcher;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;
pub mod worker;

// Re-export commonly used types
pub use models::{
    ActorFilter, CastMember, CatalogItem, DetailRecord, FilterPatch, FilterState, Genre,
    MediaType, SortKey, Video,
};

pub use api::{Gateway, GatewayError, TmdbClient};
pub use app::{App, Request, Response, View};
pub use config::Config;
pub use store::{CatalogStore, DetailLoader, FavoritesStore, SearchOverlay, SynthesisEngine};
