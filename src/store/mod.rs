//! Client-side stores
//!
//! Each store owns one slice of state and exposes the operations that may
//! mutate it. Network work is split into a request value (`begin_*`) and an
//! apply step (`finish_*`) so the TUI can run requests on background tasks;
//! the async helpers chain both for callers that can simply await.
//!
//! - `catalog`: browsable items, filters and pagination
//! - `detail`: the single open detail record
//! - `favorites`: the persisted favorites set
//! - `synthesis`: seed slots and the shuffle-and-sample run
//! - `search`: incremental search overlays

pub mod catalog;
pub mod detail;
pub mod favorites;
pub mod search;
pub mod synthesis;

pub use catalog::{CatalogStore, PageRequest};
pub use detail::{DetailLoader, DetailRequest};
pub use favorites::FavoritesStore;
pub use search::{OverlayState, SearchOverlay, SearchRequest, SearchScope};
pub use synthesis::{SynthesisEngine, SynthesisRequest};
